//! Wire types shared by the stock watcher: the catalog toppings payload, the
//! Telegram Bot API request/response bodies and MarkdownV2 escaping.

pub mod api;
pub mod markdown;
pub mod models;

pub use api::{ParseMode, SendMessageRequest, SendMessageResponse};
pub use markdown::escape_markdown;
pub use models::{Topping, ToppingCategory, ToppingsResponse};
