//! Contact form intake.

use tracing::{info, instrument};

use crate::{
    api::models::contact::ContactMessageCreate,
    db::{models::contact_messages::ContactMessage, store::Store},
    errors::Result,
    types::abbrev_uuid,
};

/// Validate and persist a contact form submission.
#[instrument(skip_all, err)]
pub async fn submit_message(store: &dyn Store, request: ContactMessageCreate) -> Result<ContactMessage> {
    let request = request.validate()?;
    let message = store.insert_contact_message(&request).await?;
    info!(message_id = %abbrev_uuid(&message.id), "Contact message received");
    Ok(message)
}
