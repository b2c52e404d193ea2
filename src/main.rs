use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use katalog::commands::{self, Status};
use katalog::invoice::XlsxTemplate;
use katalog::vat::WhitelistClient;
use katalog::{Catalog, ClientRegistry, ClientSort, KatalogConfig, KatalogError, ProductSort};

#[derive(Parser, Debug)]
#[command(name = "katalog")]
#[command(about = "Product catalog, client registry and invoices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "katalog.toml")]
    config: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage products
    #[command(subcommand)]
    Product(ProductCommand),

    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommand),

    /// Sell products to a client and fill in the invoice template
    Purchase {
        #[arg(long)]
        client: u32,

        /// Product id, repeated once per line item
        #[arg(long = "product", required = true)]
        products: Vec<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum ProductCommand {
    Add {
        name: String,
        price: String,
    },
    #[command(alias = "rm")]
    Remove {
        id: u32,
    },
    #[command(alias = "ls")]
    List {
        /// id, name or price; anything else sorts by id
        #[arg(short, long)]
        sort: Option<String>,

        /// Also write the sorted list to the sorted-products file
        #[arg(long)]
        save_sorted: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ClientCommand {
    Add {
        name: String,
        address: String,
        nip: String,
    },
    #[command(alias = "rm")]
    Remove {
        id: u32,
    },
    #[command(alias = "ls")]
    List {
        /// id or name
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Check VAT registration status as of yesterday
    Status {
        id: u32,
    },
}

fn main() -> ExitCode {
    katalog::logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(Status::Done(msg)) => {
            println!("{msg}");
            ExitCode::SUCCESS
        }
        Ok(Status::Rejected(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Status, KatalogError> {
    let config = KatalogConfig::load(&cli.config)?;

    match cli.command {
        Commands::Product(cmd) => {
            let mut catalog = Catalog::open(&config)?;
            match cmd {
                ProductCommand::Add { name, price } => {
                    commands::add_product(&mut catalog, &name, &price)
                }
                ProductCommand::Remove { id } => commands::remove_product(&mut catalog, id),
                ProductCommand::List { sort, save_sorted } => {
                    let sort = sort.as_deref().map(ProductSort::parse_lenient);
                    if save_sorted {
                        commands::save_sorted_products(
                            &mut catalog,
                            sort.unwrap_or_default(),
                            &config.sorted_products_path,
                        )
                    } else {
                        Ok(commands::list_products(&mut catalog, sort))
                    }
                }
            }
        }
        Commands::Client(cmd) => {
            let mut clients = ClientRegistry::open(&config)?;
            match cmd {
                ClientCommand::Add { name, address, nip } => {
                    commands::add_client(&mut clients, &name, &address, &nip)
                }
                ClientCommand::Remove { id } => commands::remove_client(&mut clients, id),
                ClientCommand::List { sort } => Ok(commands::list_clients(
                    &mut clients,
                    sort.as_deref().map(ClientSort::parse_lenient),
                )),
                ClientCommand::Status { id } => {
                    let registry = match WhitelistClient::from_config(&config) {
                        Ok(r) => r,
                        Err(e) => return Ok(Status::Rejected(e.to_string())),
                    };
                    let today = chrono::Local::now().date_naive();
                    Ok(commands::check_status(&registry, &clients, id, today))
                }
            }
        }
        Commands::Purchase { client, products } => {
            let catalog = Catalog::open(&config)?;
            let clients = ClientRegistry::open(&config)?;
            let mut template = XlsxTemplate::new(&config.invoice.template_path);
            commands::purchase(
                &catalog,
                &clients,
                &mut template,
                &config.invoice,
                client,
                &products,
            )
        }
    }
}
