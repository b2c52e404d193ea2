use katalog::*;
use rust_decimal_macros::dec;

fn main() {
    let dir = tempfile::tempdir().unwrap();

    // Products: add, sort, write a sorted copy
    println!("=== Catalog ===\n");

    let path = dir.path().join("katalog.txt");
    let mut catalog = Catalog::open_at(&path, LineEncoding::Quoted).unwrap();
    catalog.add("Klucz płaski 13", dec!(24.50)).unwrap();
    catalog.add("Śruba M8, ocynk", dec!(0.35)).unwrap();
    catalog.add("Wiertarka", dec!(349)).unwrap();

    match catalog.add("Gratis", dec!(0)) {
        Ok(p) => println!("  unexpected: {p}"),
        Err(e) => println!("  rejected: {e}"),
    }

    catalog.sort(ProductSort::Price);
    for product in catalog.list() {
        println!("  {product}");
    }
    let sorted = dir.path().join("katalog_posortowany.txt");
    catalog.save_sorted(&sorted).unwrap();
    println!("\n  sorted copy:\n{}", std::fs::read_to_string(&sorted).unwrap());

    // Clients: NIP validation and the identity line used on invoices
    println!("=== Clients ===\n");

    let mut clients = ClientRegistry::open_at(dir.path().join("klienci.csv")).unwrap();
    for (name, address, nip) in [
        ("Anna Nowak", "ul. Długa 5, Gdańsk", "0123456789"),
        ("Jan Kowalski", "Rynek 2, Kraków", "526-025-02-74"),
    ] {
        match clients.add(name, address, nip) {
            Ok(c) => println!("  added: {}", c.identity()),
            Err(e) => println!("  {name} => INVALID: {e}"),
        }
    }

    let on_disk = std::fs::read_to_string(clients.path()).unwrap();
    println!("\n  on disk:\n{on_disk}");
}
