use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use line_property::catalog::{
    load_featured, BedroomFilter, CatalogController, CatalogState, FilterCriteria, ViewMode,
};
use line_property::contact::{ContactField, ContactPage};
use line_property::detail::{DetailState, PropertyDetail};
use line_property::format::{compact_price, price_or_on_request, status_label, style_label};
use line_property::map::MapView;
use line_property::store::{HttpListingStore, ListingStore, MemoryListingStore};
use line_property::{Config, Property, PropertyStatus, PropertyStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "line-property", about = "Browse and contact the Line Property portfolio")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter the catalog
    Catalog(CatalogArgs),
    /// Show one property
    Detail { id: String },
    /// List map markers
    Map,
    /// Show featured properties
    Featured,
    /// Send a contact request
    Contact(ContactArgs),
}

#[derive(Args)]
struct CatalogArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long)]
    style: Option<PropertyStyle>,
    #[arg(long)]
    status: Option<PropertyStatus>,
    #[arg(long)]
    min_price: Option<u64>,
    #[arg(long)]
    max_price: Option<u64>,
    /// Exact count, or 6+
    #[arg(long)]
    bedrooms: Option<BedroomFilter>,
    /// One line per property instead of cards
    #[arg(long)]
    list: bool,
    /// Write the results as JSON to this file
    #[arg(long)]
    save: Option<String>,
}

impl CatalogArgs {
    fn criteria(&self) -> FilterCriteria {
        let defaults = FilterCriteria::default();
        FilterCriteria {
            search: self.search.clone(),
            country: self.country.clone(),
            style: self.style,
            status: self.status,
            min_price: self.min_price.unwrap_or(defaults.min_price),
            max_price: self.max_price.unwrap_or(defaults.max_price),
            bedrooms: self.bedrooms.unwrap_or_default(),
        }
    }
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Property id, or "general"
    #[arg(long, default_value = "")]
    interest: String,
    #[arg(long, default_value = "")]
    message: String,
}

fn build_store(config: &Config) -> Result<Box<dyn ListingStore>> {
    if config.uses_hosted_store() {
        Ok(Box::new(HttpListingStore::from_config(config)?))
    } else {
        warn!("LINE_APP_ID not set, using the built-in sample portfolio");
        Ok(Box::new(MemoryListingStore::with_sample_listings()))
    }
}

fn print_card(index: usize, property: &Property) {
    println!(
        "{}. {} ({})",
        index + 1,
        property.display_title(),
        price_or_on_request(property.price)
    );
    println!("   {}, {}", property.display_location(), property.display_country());
    let style = property.style.map(style_label).unwrap_or("-");
    println!("   {} · {}", style, status_label(property.status));
    if let (Some(bedrooms), Some(sqm)) = (property.bedrooms, property.sqm) {
        println!("   {} camere, {} m²", bedrooms, sqm);
    }
    if !property.features.is_empty() {
        println!("   Features: {}", property.features.join(", "));
    }
    println!("   ID: {}", property.id);
    println!();
}

fn print_row(property: &Property) {
    let price = property.price.map(compact_price).unwrap_or_default();
    println!(
        "{:<32} {:<20} {:>10}  {}",
        property.display_title(),
        property.display_location(),
        price,
        property.id
    );
}

async fn run_catalog(store: &dyn ListingStore, config: &Config, args: CatalogArgs) -> Result<()> {
    let mut catalog = CatalogController::with_limit(config.catalog_limit);
    catalog.set_criteria(args.criteria());
    if args.list {
        catalog.set_view_mode(ViewMode::List);
    }

    catalog.load(store).await;

    match catalog.state() {
        CatalogState::Loading => bail!("Catalog did not finish loading"),
        CatalogState::Error(message) => bail!("Failed to load the catalog: {}", message),
        CatalogState::Empty(_) => {
            info!("Nessuna proprietà trovata. Prova a modificare i filtri di ricerca.");
        }
        CatalogState::Populated(results) => {
            info!("✅ {} proprietà trovate\n", results.len());
            for (i, property) in results.iter().enumerate() {
                match catalog.view_mode() {
                    ViewMode::Grid => print_card(i, property),
                    ViewMode::List => print_row(property),
                }
            }
        }
    }

    if let Some(path) = args.save {
        let json = serde_json::to_string_pretty(catalog.results())?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path))?;
        info!("💾 Saved {} properties to {}", catalog.result_count(), path);
    }

    Ok(())
}

async fn run_detail(store: &dyn ListingStore, id: &str) -> Result<()> {
    let mut detail = PropertyDetail::new();
    detail.load(store, Some(id)).await;

    match detail.state() {
        DetailState::Found(property) => {
            print_card(0, property);
            if let Some(description) = &property.description {
                println!("{}\n", description);
            }
            if let Some(gallery) = detail.gallery() {
                for image in gallery.images() {
                    println!("   🖼  {}", image);
                }
            }
            Ok(())
        }
        DetailState::NotFound => {
            println!("Proprietà non trovata. Torna alle Proprietà.");
            Ok(())
        }
        DetailState::Error(message) => bail!("Failed to load property {}: {}", id, message),
        DetailState::Loading => bail!("Property {} did not finish loading", id),
    }
}

async fn run_map(store: &dyn ListingStore, config: &Config) -> Result<()> {
    let view = MapView::load(store, config.catalog_limit).await?;

    info!("🗺  {} markers around {:?}", view.markers().len(), view.center());
    for marker in view.markers() {
        println!(
            "{:>9.4} {:>9.4}  {} {}",
            marker.position.lat, marker.position.lng, marker.title, marker.price_label
        );
    }
    Ok(())
}

async fn run_featured(store: &dyn ListingStore) -> Result<()> {
    let featured = load_featured(store).await?;
    info!("⭐ {} proprietà in evidenza\n", featured.len());
    for (i, property) in featured.iter().enumerate() {
        print_card(i, property);
    }
    Ok(())
}

async fn run_contact(store: &dyn ListingStore, args: ContactArgs) -> Result<()> {
    let mut page = ContactPage::load(store).await;
    page.select_interest(&args.interest).with_context(|| {
        let offered: Vec<&str> = page.options().iter().map(|o| o.value.as_str()).collect();
        format!("--interest must be one of: {}", offered.join(", "))
    })?;

    let form = page.form_mut();
    for (field, value) in [
        (ContactField::Name, args.name),
        (ContactField::Email, args.email),
        (ContactField::Phone, args.phone),
        (ContactField::Message, args.message),
    ] {
        form.set_field(field, value)?;
    }

    form.submit(store).await?;
    println!("Richiesta Inviata con Successo. Un nostro consulente ti risponderà entro 24 ore.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let store = build_store(&config)?;

    info!("🏛  Line Property ({} store)", store.store_name());

    match cli.command {
        Command::Catalog(args) => run_catalog(store.as_ref(), &config, args).await,
        Command::Detail { id } => run_detail(store.as_ref(), &id).await,
        Command::Map => run_map(store.as_ref(), &config).await,
        Command::Featured => run_featured(store.as_ref()).await,
        Command::Contact(args) => run_contact(store.as_ref(), args).await,
    }
}
