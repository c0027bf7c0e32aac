//! HTTP client for the moneyhack backend

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use moneyhack_core::errors::{BackendError, Error, Result};
use moneyhack_core::types::{EvmAddress, RawAmount};

use crate::endpoints::*;
use crate::resources::*;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated requests carry the wallet-signature token:
/// `Authorization: Signature <token>`
fn auth_header_value(auth_token: &str) -> String {
    format!("Signature {}", auth_token)
}

/// Typed client for the backend REST API.
///
/// No retry loop: this client backs interactive screens, so failures
/// surface to the caller immediately instead of stalling the UI.
#[derive(Clone)]
pub struct MoneyHackClient {
    http: reqwest::Client,
    base_url: String,
}

impl MoneyHackClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "backend request failed");
            BackendError::Unreachable {
                url: url.to_string(),
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized.into());
        }
        if !status.is_success() {
            let message = match response.json::<BackendErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            tracing::warn!(%url, status = status.as_u16(), %message, "backend returned error");
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()).into())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, auth_token: Option<&str>) -> Result<T> {
        let url = self.url(path);
        let mut request = self.http.get(&url);
        if let Some(token) = auth_token {
            request = request.header(AUTHORIZATION, auth_header_value(token));
        }
        self.execute(request, &url).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> Result<T> {
        let url = self.url(path);
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = auth_token {
            request = request.header(AUTHORIZATION, auth_header_value(token));
        }
        self.execute(request, &url).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str, auth_token: Option<&str>) -> Result<T> {
        let url = self.url(path);
        let mut request = self.http.delete(&url);
        if let Some(token) = auth_token {
            request = request.header(AUTHORIZATION, auth_header_value(token));
        }
        self.execute(request, &url).await
    }

    // =========================================================================
    // Market and collateral data
    // =========================================================================

    /// Collateral assets the product accepts
    pub async fn get_supported_collaterals(
        &self,
        auth_token: &str,
    ) -> Result<Vec<CollateralAsset>> {
        let response: GetSupportedCollateralsResponse =
            self.get("v1/collaterals", Some(auth_token)).await?;
        Ok(response.collaterals)
    }

    /// Borrow markets plus yield vault snapshot (unauthenticated)
    pub async fn get_market_data(&self) -> Result<MarketData> {
        let response: GetMarketDataResponse = self.get("v1/market-data", None).await?;
        Ok(response.market_data)
    }

    /// Balances of a user or agent wallet
    pub async fn get_wallet(&self, wallet_address: &EvmAddress, auth_token: &str) -> Result<Wallet> {
        let path = format!("v1/wallets/{}", wallet_address);
        let response: GetWalletResponse = self.get(&path, Some(auth_token)).await?;
        Ok(response.wallet)
    }

    // =========================================================================
    // User configuration
    // =========================================================================

    pub async fn get_user_config(
        &self,
        user_address: &EvmAddress,
        auth_token: &str,
    ) -> Result<UserConfig> {
        let path = format!("v1/users/{}/config", user_address);
        let response: GetUserConfigResponse = self.get(&path, Some(auth_token)).await?;
        Ok(response.user_config)
    }

    pub async fn update_user_config(
        &self,
        user_address: &EvmAddress,
        telegram_handle: Option<String>,
        preferred_ltv: f64,
        auth_token: &str,
    ) -> Result<UserConfig> {
        let path = format!("v1/users/{}/config", user_address);
        let request = UpdateUserConfigRequest {
            telegram_handle,
            preferred_ltv,
        };
        let response: UpdateUserConfigResponse =
            self.post(&path, &request, Some(auth_token)).await?;
        Ok(response.user_config)
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Open a position: the agent borrows against the deposited collateral
    pub async fn create_position(
        &self,
        user_address: &EvmAddress,
        request: CreatePositionRequest,
        auth_token: &str,
    ) -> Result<CreatePositionResponse> {
        let path = format!("v1/users/{}/positions", user_address);
        self.post(&path, &request, Some(auth_token)).await
    }

    /// The user's position, if any
    pub async fn get_position(
        &self,
        user_address: &EvmAddress,
        auth_token: &str,
    ) -> Result<Option<Position>> {
        let path = format!("v1/users/{}/position", user_address);
        let response: GetPositionResponse = self.get(&path, Some(auth_token)).await?;
        Ok(response.position)
    }

    /// Unsigned approve/transfer payloads for opening a position
    pub async fn get_position_transactions(
        &self,
        user_address: &EvmAddress,
        request: GetPositionTransactionsRequest,
        auth_token: &str,
    ) -> Result<PositionTransactions> {
        let path = format!("v1/users/{}/position/transactions", user_address);
        let response: GetPositionTransactionsResponse =
            self.post(&path, &request, Some(auth_token)).await?;
        Ok(response.position_transactions)
    }

    /// Authoritative withdrawal preview: estimated LTV shift plus the
    /// backend's is_warning / is_blocked / max_safe_withdraw gating
    pub async fn get_withdraw_preview(
        &self,
        user_address: &EvmAddress,
        amount: RawAmount,
        auth_token: &str,
    ) -> Result<WithdrawPreview> {
        let path = format!("v1/users/{}/position/withdraw/preview", user_address);
        let request = GetWithdrawPreviewRequest { amount };
        let response: GetWithdrawPreviewResponse =
            self.post(&path, &request, Some(auth_token)).await?;
        Ok(response.withdraw_preview)
    }

    /// Withdraw vault USDC back to the user's wallet
    pub async fn withdraw(
        &self,
        user_address: &EvmAddress,
        amount: RawAmount,
        auth_token: &str,
    ) -> Result<WithdrawResponse> {
        let path = format!("v1/users/{}/position/withdraw", user_address);
        let request = WithdrawRequest { amount };
        self.post(&path, &request, Some(auth_token)).await
    }

    /// Unwind the position: repay debt, return collateral
    pub async fn close_position(
        &self,
        user_address: &EvmAddress,
        auth_token: &str,
    ) -> Result<ClosePositionResponse> {
        let path = format!("v1/users/{}/position/close", user_address);
        self.post(&path, &serde_json::json!({}), Some(auth_token))
            .await
    }

    // =========================================================================
    // Agent chat
    // =========================================================================

    pub async fn get_chat_messages(
        &self,
        user_address: &EvmAddress,
        auth_token: &str,
    ) -> Result<Vec<ChatMessage>> {
        let path = format!("v1/users/{}/agent/messages", user_address);
        let response: GetChatMessagesResponse = self.get(&path, Some(auth_token)).await?;
        Ok(response.messages)
    }

    pub async fn send_chat_message(
        &self,
        user_address: &EvmAddress,
        text: impl Into<String>,
        auth_token: &str,
    ) -> Result<Vec<ChatMessage>> {
        let path = format!("v1/users/{}/agent/messages", user_address);
        let request = SendChatMessageRequest { text: text.into() };
        let response: SendChatMessageResponse =
            self.post(&path, &request, Some(auth_token)).await?;
        Ok(response.messages)
    }

    // =========================================================================
    // Telegram notifications
    // =========================================================================

    pub async fn get_telegram_bot_username(
        &self,
        user_address: &EvmAddress,
        auth_token: &str,
    ) -> Result<String> {
        let path = format!("v1/users/{}/telegram/login-url", user_address);
        let response: TelegramLoginUrlResponse = self.get(&path, Some(auth_token)).await?;
        Ok(response.bot_username)
    }

    pub async fn verify_telegram_secret(
        &self,
        user_address: &EvmAddress,
        telegram_secret: impl Into<String>,
        auth_token: &str,
    ) -> Result<UserConfig> {
        let path = format!("v1/users/{}/telegram/secret-verify", user_address);
        let request = TelegramSecretVerifyRequest {
            telegram_secret: telegram_secret.into(),
        };
        let response: TelegramSecretVerifyResponse =
            self.post(&path, &request, Some(auth_token)).await?;
        Ok(response.user_config)
    }

    pub async fn disconnect_telegram(
        &self,
        user_address: &EvmAddress,
        auth_token: &str,
    ) -> Result<UserConfig> {
        let path = format!("v1/users/{}/telegram", user_address);
        let response: DisconnectTelegramResponse = self.delete(&path, Some(auth_token)).await?;
        Ok(response.user_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MoneyHackClient::new("https://api.example.com/").unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(client.url("v1/market-data"), "https://api.example.com/v1/market-data");
    }

    #[test]
    fn test_auth_header_value() {
        assert_eq!(auth_header_value("abc123"), "Signature abc123");
    }
}
