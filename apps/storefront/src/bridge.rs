//! # Invoke Bridge
//!
//! Line-delimited JSON between the web front end and the commands.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Request, One Response                            │
//! │                                                                         │
//! │  stdin  ──► {"id":7,"cmd":"add_to_cart","args":{"productId":"1"}}       │
//! │                │                                                        │
//! │                ▼                                                        │
//! │           invoke(app, cmd, args)                                        │
//! │                │                                                        │
//! │        ┌───────┴────────┐                                               │
//! │        ▼                ▼                                               │
//! │  stdout ◄── {"id":7,"ok":{...}}                                         │
//! │  stdout ◄── {"id":7,"error":{"code":"NOT_FOUND","message":"..."}}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - `id` is echoed back untouched (any JSON value, `null` if absent).
//! - `args` keys are camelCase; missing `args` means no arguments.
//! - Unknown commands answer `NOT_FOUND`, undecodable arguments
//!   `VALIDATION_ERROR`.
//! - Requests are handled one at a time, in arrival order.
//!
//! Logs go to stderr so stdout carries responses only.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use santos_core::ProductFilter;

use crate::commands;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// A decoded invoke request.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

/// The reply to one request.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ok { id: Value, ok: Value },
    Err { id: Value, error: ApiError },
}

impl Response {
    fn new(id: Value, result: ApiResult<Value>) -> Self {
        match result {
            Ok(ok) => Response::Ok { id, ok },
            Err(error) => Response::Err { id, error },
        }
    }
}

// =============================================================================
// Command Arguments
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListProductsArgs {
    filter: Option<ProductFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductArgs {
    product_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    query: String,
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartArgs {
    product_id: String,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterArgs {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SignInArgs {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct PasswordArgs {
    password: String,
}

fn args<T: DeserializeOwned>(cmd: &str, args: Value) -> ApiResult<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    serde_json::from_value(args)
        .map_err(|e| ApiError::validation(format!("Invalid arguments for {}: {}", cmd, e)))
}

fn reply<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one command by name.
///
/// ```rust,ignore
/// let cart = invoke(&app, "add_to_cart", json!({ "productId": "1", "quantity": 2 })).await?;
/// assert_eq!(cart["count"], 2);
/// ```
pub async fn invoke(app: &AppState, cmd: &str, raw: Value) -> ApiResult<Value> {
    debug!(cmd, "invoke");

    match cmd {
        // Catalog
        "list_products" => {
            let a: ListProductsArgs = args(cmd, raw)?;
            reply(commands::catalog::list_products(&app.db, a.filter).await?)
        }
        "list_categories" => reply(commands::catalog::list_categories(&app.db).await?),
        "get_product" => {
            let a: ProductArgs = args(cmd, raw)?;
            reply(commands::catalog::get_product(&app.db, &app.storefront, &a.product_id).await?)
        }
        "search_products" => {
            let a: SearchArgs = args(cmd, raw)?;
            reply(commands::catalog::search_products(&app.db, &a.query, a.limit).await?)
        }

        // Cart
        "get_cart" => reply(commands::cart::get_cart(&app.storefront)),
        "add_to_cart" => {
            let a: AddToCartArgs = args(cmd, raw)?;
            reply(
                commands::cart::add_to_cart(
                    &app.db,
                    &app.storefront,
                    &a.product_id,
                    a.quantity,
                    a.size.as_deref(),
                    a.color.as_deref(),
                )
                .await?,
            )
        }
        "clear_cart" => reply(commands::cart::clear_cart(&app.storefront)),

        // Wishlist
        "get_wishlist" => reply(commands::wishlist::get_wishlist(&app.db, &app.storefront).await?),
        "toggle_wishlist" => {
            let a: ProductArgs = args(cmd, raw)?;
            reply(commands::wishlist::toggle_wishlist(&app.db, &app.storefront, &a.product_id).await?)
        }

        // Recently viewed
        "get_history" => reply(commands::history::get_history(&app.storefront)),
        "dismiss_history" => reply(commands::history::dismiss_history(&app.storefront)),

        // Checkout
        "checkout_summary" => reply(commands::checkout::checkout_summary(&app.storefront, &app.checkout)),
        "checkout_advance" => reply(
            commands::checkout::checkout_advance(&app.config, &app.storefront, &app.checkout).await?,
        ),
        "checkout_back" => reply(commands::checkout::checkout_back(&app.storefront, &app.checkout)),
        "place_order" => reply(
            commands::checkout::place_order(&app.config, &app.storefront, &app.checkout).await?,
        ),

        // Accounts
        "register" => {
            let a: RegisterArgs = args(cmd, raw)?;
            reply(commands::auth::register(&app.db, &app.session, &a.name, &a.email, &a.password).await?)
        }
        "sign_in" => {
            let a: SignInArgs = args(cmd, raw)?;
            reply(commands::auth::sign_in(&app.db, &app.session, &a.email, &a.password).await?)
        }
        "sign_out" => {
            commands::auth::sign_out(&app.session);
            Ok(Value::Null)
        }
        "current_user" => reply(commands::auth::current_user(&app.session)),
        "check_password" => {
            let a: PasswordArgs = args(cmd, raw)?;
            reply(commands::auth::check_password(&a.password))
        }

        // Config
        "get_config" => reply(commands::config::get_config(&app.config)),

        _ => Err(ApiError::not_found("Command", cmd)),
    }
}

/// Decodes and runs one request line.
pub async fn handle_line(app: &AppState, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => {
            let result = invoke(app, &request.cmd, request.args).await;
            if let Err(e) = &result {
                debug!(cmd = %request.cmd, code = ?e.code, "Command failed: {}", e.message);
            }
            Response::new(request.id, result)
        }
        Err(e) => {
            warn!("Malformed request: {}", e);
            Response::new(Value::Null, Err(ApiError::validation(format!("Malformed request: {}", e))))
        }
    }
}

/// Serves requests until the reader reaches end of input.
///
/// Blank lines are skipped. Each response is written and flushed before the
/// next request is read.
pub async fn serve<R, W>(app: &AppState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(app, line).await;

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    debug!("Input closed; bridge stopping");
    Ok(())
}
