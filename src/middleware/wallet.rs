// src/middleware/wallet.rs

use axum::{extract::OptionalFromRequestParts, http::request::Parts};

use crate::common::error::{ApiError, AppError};

// O front-end envia a carteira conectada neste cabeçalho
const WALLET_HEADER: &str = "x-wallet-address";

// Carteira conectada no navegador de quem fez a requisição.
// Não é autenticação: só identifica quem enviou.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedWallet(pub String);

impl ConnectedWallet {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        let hex = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or_else(|| AppError::InvalidWalletAddress(raw.to_string()))?;

        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::InvalidWalletAddress(raw.to_string()));
        }

        Ok(Self(format!("0x{}", hex)))
    }
}

fn read_header(parts: &Parts) -> Result<Option<ConnectedWallet>, ApiError> {
    let Some(value) = parts.headers.get(WALLET_HEADER) else {
        return Ok(None);
    };

    let value_str = value
        .to_str()
        .map_err(|_| AppError::InvalidWalletAddress("<non-ascii>".into()).to_api_error())?;

    ConnectedWallet::parse(value_str)
        .map(Some)
        .map_err(AppError::to_api_error)
}

// Opcional: ausente vira None, malformado continua sendo 400
impl<S> OptionalFromRequestParts<S> for ConnectedWallet
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        read_header(parts)
    }
}
