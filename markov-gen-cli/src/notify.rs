use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use serde::Serialize;

/// Chat webhook payload.
#[derive(Debug, Serialize, PartialEq)]
pub struct WebhookMessage<'a> {
	pub text: &'a str,
	pub username: &'a str,
	#[serde(rename = "icon_emoji")]
	pub icon: &'a str,
}

/// Posts generated texts to an incoming chat webhook.
pub struct WebhookNotifier {
	client: Client,
	url: String,
	username: String,
	icon: String,
}

impl WebhookNotifier {
	/// Creates a notifier with a reusable blocking client and a timeout.
	pub fn new(url: &str, username: &str, icon: &str) -> anyhow::Result<Self> {
		let client = Client::builder()
			.timeout(Duration::new(5, 0))
			.build()
			.context("Failed to build HTTP client")?;
		Ok(Self { client, url: url.to_owned(), username: username.to_owned(), icon: icon.to_owned() })
	}

	pub fn message<'a>(&'a self, text: &'a str) -> WebhookMessage<'a> {
		WebhookMessage { text, username: &self.username, icon: &self.icon }
	}

	/// Sends `text` as a JSON POST, failing on a non-success status.
	pub fn post(&self, text: &str) -> anyhow::Result<()> {
		self.client
			.post(&self.url)
			.json(&self.message(text))
			.send()
			.and_then(|response| response.error_for_status())
			.with_context(|| format!("Failed to post to webhook {}", self.url))?;
		log::info!("posted {} characters to webhook", text.len());
		Ok(())
	}
}
