use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use felis_application::BreedBrowser;
use felis_core::catalog::{Breed, BreedCatalog, TEMPERAMENT_PREVIEW_TRAITS, truncate_text};
use felis_core::guard::Route;
use felis_core::search::filter_breeds;
use felis_interaction::CatalogClient;

use super::context::AppContext;

const LIST_TEMPERAMENT_CHARS: usize = 30;
const DESCRIPTION_CHARS: usize = 240;

fn catalog(ctx: &AppContext) -> Result<Arc<dyn BreedCatalog>> {
    let client = CatalogClient::from_config(&ctx.config.api, ctx.session.clone())
        .context("Failed to set up catalog client")?;
    Ok(Arc::new(client))
}

fn print_breeds(breeds: &[Breed]) {
    if breeds.is_empty() {
        println!("{}", "No breeds found.".bright_black());
        return;
    }
    for breed in breeds {
        println!(
            "{:<6} {} {}  {}",
            breed.id.bright_black(),
            breed.name.bold(),
            format!("({})", breed.origin).bright_black(),
            truncate_text(&breed.temperament, LIST_TEMPERAMENT_CHARS).cyan()
        );
    }
}

pub async fn list(ctx: &AppContext, query: Option<&str>) -> Result<()> {
    ctx.enter(Route::CatBreeds)?;

    let browser = BreedBrowser::new(catalog(ctx)?, &ctx.config.browse, &ctx.cancel);
    browser.load_all_breeds().await?;

    if let Some(query) = query {
        browser.on_search_input(query);
        browser.perform_search();
    }

    let state = browser.snapshot();
    browser.close();

    print_breeds(&state.displayed);
    println!(
        "{}",
        format!("{} of {} breeds", state.displayed.len(), state.all_breeds.len()).bright_black()
    );
    Ok(())
}

pub async fn show(ctx: &AppContext, breed_id: &str, limit: Option<u32>) -> Result<()> {
    ctx.enter(Route::CatBreeds)?;

    let mut browse = ctx.config.browse.clone();
    if let Some(limit) = limit {
        browse.images_per_breed = limit;
    }

    let browser = BreedBrowser::new(catalog(ctx)?, &browse, &ctx.cancel);
    browser.load_all_breeds().await?;
    browser.select_breed(breed_id).await?;
    let state = browser.snapshot();
    browser.close();

    let breed = state.selected.context("No breed selected")?;
    println!("{} {}", breed.name.bold(), format!("({})", breed.id).bright_black());
    println!("  {:<12} {}", "origin".bright_black(), breed.origin);
    println!(
        "  {:<12} {}",
        "temperament".bright_black(),
        breed.temperament_traits(TEMPERAMENT_PREVIEW_TRAITS).join(" · ")
    );
    println!("  {:<12} {} years", "life span".bright_black(), breed.life_span);
    println!("  {:<12} {} kg", "weight".bright_black(), breed.weight.metric);
    if !breed.description.is_empty() {
        println!();
        println!("  {}", truncate_text(&breed.description, DESCRIPTION_CHARS));
    }

    println!();
    if state.images.is_empty() {
        println!("{}", "No images available.".bright_black());
    }
    for image in &state.images {
        println!("  {} {}x{}", image.url.underline(), image.width, image.height);
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, remote: bool) -> Result<()> {
    ctx.enter(Route::CatBreeds)?;

    let catalog = catalog(ctx)?;
    let breeds = if remote {
        catalog.search_breeds(query).await?
    } else {
        filter_breeds(&catalog.list_breeds().await?, query)
    };

    print_breeds(&breeds);
    Ok(())
}
