use clap::Parser;
use listing_scout::Listings;
use listing_scout::config::ScraperConfig;
use listing_scout::output;

mod args;
use args::{Args, convert_format};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting listing scrape for: {}", args.url);

    println!("Note: scraping requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    // Assemble the configuration: file first, CLI flags on top
    let mut config = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ScraperConfig::new(&args.url),
    };
    config.start_url = args.url.clone();
    if args.max_pages.is_some() {
        config.max_pages = args.max_pages;
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        config.webdriver_url = webdriver_url.clone();
    }
    if let Some(email) = &args.email {
        config.contact_email = email.clone();
    }
    let contact_email = config.contact_email.clone();

    // Run the scrape
    let start_time = std::time::Instant::now();
    let result = match Listings::new(&args.url).with_config(config).run().await {
        Ok(result) => result,
        Err(e) => {
            ::log::error!("Scraping failed: {}", e);
            std::process::exit(1);
        }
    };

    let duration = start_time.elapsed();
    ::log::info!(
        "Scraping complete - {} properties in {:.2} seconds",
        result.properties.len(),
        duration.as_secs_f64()
    );

    // Persist the records
    if let Err(e) = output::write_result(
        &args.output,
        &result,
        convert_format(args.format),
        &contact_email,
    ) {
        ::log::error!("Failed to write {}: {}", args.output.display(), e);
        std::process::exit(1);
    }

    // Print a short summary with a sample of the first record
    println!("Total properties scraped: {}", result.properties.len());
    println!("Output file: {}", args.output.display());
    if let Some(first) = result.properties.first() {
        println!("Sample property:");
        println!("  Title: {}", first.title);
        println!("  Location: {}", first.location);
        println!("  Type: {}", first.listing_type);
        println!("  URL: {}", first.url.as_deref().unwrap_or("N/A"));
    }
}
