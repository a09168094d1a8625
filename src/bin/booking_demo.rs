// Scripted walk through both booking forms: entry, modal prefill, submission

use anyhow::{Context, Result};
use chrono::{Days, Local};
use stay_quote::dates::format_calendar_date;
use stay_quote::logger::init_logger;
use stay_quote::{
    submit, CalculatorConfig, CalculatorInstance, FieldIds, Page, Registry, RoomCatalog,
    SystemClock,
};
use std::sync::Arc;
use tracing::info;

fn print_form(instance: &CalculatorInstance) {
    println!(
        "[{}] nights={} rate={} total={} notice={}",
        instance.name(),
        instance.nights_display(),
        instance.rate_display(),
        instance.total_display(),
        if instance.notice_visible() { "shown" } else { "hidden" }
    );
}

fn enter(page: &Page, registry: &mut Registry, id: &str, value: &str) -> Result<()> {
    page.input(id)
        .with_context(|| format!("no input element {}", id))?
        .set_value(value);
    registry.dispatch(id);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logger(verbose);

    // Optional path to a {"room": rate} JSON catalog
    let catalog = match args.iter().find(|a| !a.starts_with('-')) {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path))?;
            RoomCatalog::from_json(&json).context("parsing catalog")?
        }
        None => RoomCatalog::default(),
    };
    info!("Loaded catalog with {} room types", catalog.len());

    let page = Page::new();
    let main_ids = FieldIds::main();
    let modal_ids = FieldIds::modal();
    page.mount_form(&main_ids);
    page.mount_form(&modal_ids);

    let config = CalculatorConfig::default();
    let rejection = config.rejection_message.clone();
    let mut registry =
        Registry::start(&page, Arc::new(catalog), Arc::new(SystemClock), config).await?;

    let today = Local::now().date_naive();
    let checkin = format_calendar_date(today + Days::new(7));
    let checkout = format_calendar_date(today + Days::new(10));

    enter(&page, &mut registry, &main_ids.checkin, &checkin)?;
    enter(&page, &mut registry, &main_ids.checkout, &checkout)?;
    enter(&page, &mut registry, &main_ids.room_type, "standard")?;

    // Reversed dates on the modal form, so its submission is rejected
    enter(&page, &mut registry, &modal_ids.checkin, &checkout)?;
    enter(&page, &mut registry, &modal_ids.checkout, &checkin)?;
    registry.prefill_modal_room("deluxe");

    for instance in [registry.main(), registry.modal()].into_iter().flatten() {
        print_form(instance);
    }

    let modal = registry.modal_mut().context("modal form not bound")?;
    match submit(modal, &rejection) {
        Ok(confirmation) => println!("{}", confirmation.message()),
        Err(e) => println!("[modal] {}", e),
    }

    let main = registry.main_mut().context("main form not bound")?;
    let confirmation = submit(main, &rejection)?;
    println!("{}", confirmation.message());
    println!("{}", serde_json::to_string_pretty(&confirmation)?);

    for instance in [registry.main(), registry.modal()].into_iter().flatten() {
        print_form(instance);
    }
    Ok(())
}
