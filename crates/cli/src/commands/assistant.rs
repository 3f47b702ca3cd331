//! Chat assistant and collaborator commands.

use shopfront_storefront::collaborator::{CollaboratorClient, SearchQuery};
use shopfront_storefront::routes::collaborator::MAX_LIMIT;
use shopfront_storefront::services::ChatResponder;

use super::{CliError, Context, product_row};

/// Print the scripted reply to `message`.
pub fn chat(message: &str) {
    let reply = ChatResponder::new().reply(message);
    println!("{reply}");
}

/// Print recommendations for the signed-in identity.
///
/// # Errors
///
/// Returns `CliError::Collaborator` if the request fails.
pub async fn recommend(ctx: &Context, limit: u32) -> Result<(), CliError> {
    let client = CollaboratorClient::new(&ctx.config.collaborator)?;
    let user_id = ctx.storefront.identity().map(|identity| &identity.id);
    let recommendations = client.get_recommendations(user_id, request_limit(limit)).await?;

    if recommendations.is_personalized {
        println!("Picked for you:");
    } else {
        println!("Popular right now:");
    }
    for product in &recommendations.products {
        println!("{}", product_row(product));
    }
    Ok(())
}

/// Clamp a requested recommendation count to what the server accepts.
const fn request_limit(limit: u32) -> u32 {
    if limit == 0 {
        1
    } else if limit > MAX_LIMIT {
        MAX_LIMIT
    } else {
        limit
    }
}

/// Print collaborator search results.
///
/// # Errors
///
/// Returns `CliError::Collaborator` if the request fails.
pub async fn search(ctx: &Context, query: &SearchQuery) -> Result<(), CliError> {
    let client = CollaboratorClient::new(&ctx.config.collaborator)?;
    let products = client.search(query).await?;

    if products.is_empty() {
        println!("No products found");
    }
    for product in &products {
        println!("{}", product_row(product));
    }
    Ok(())
}
