//! Client for the Flipt feature-flag backend.
//!
//! Every evaluation carries a caller-supplied default and absorbs backend
//! failures: a timeout, transport error, or bad payload yields the default
//! instead of an error. Handlers stay available when the flag backend is
//! down, which is the whole point of gating behavior behind flags here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const PRICE_DISPLAY_STRATEGY: &str = "price-display-strategy";
pub const REAL_TIME_AVAILABILITY: &str = "real-time-availability";
pub const LOYALTY_PROGRAM: &str = "loyalty-program";
pub const INSTANT_BOOKING: &str = "instant-booking";
pub const SIMILAR_HOTELS: &str = "similar-hotels";

/// Targeting context sent with every evaluation.
pub type FlagContext = HashMap<String, String>;

/// An evaluated flag. `is_default` is true when the backend could not be
/// consulted (or returned nothing) and the caller's default was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagValue<T> {
    pub value: T,
    pub is_default: bool,
}

impl<T> FlagValue<T> {
    fn resolved(value: T) -> Self {
        Self {
            value,
            is_default: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            is_default: true,
        }
    }
}

#[derive(Serialize)]
struct EvaluationRequest<'a> {
    namespace_key: &'a str,
    flag_key: &'a str,
    entity_id: &'a str,
    context: &'a FlagContext,
}

#[derive(Deserialize)]
struct BooleanEvaluation {
    enabled: bool,
    #[serde(default)]
    reason: String,
}

#[derive(Deserialize)]
struct VariantEvaluation {
    #[serde(default)]
    variant_key: String,
    #[serde(default)]
    reason: String,
}

pub struct FliptClient {
    http: reqwest::Client,
    base_url: String,
    namespace: String,
}

impl FliptClient {
    /// Build a client with a bounded per-request timeout. The timeout is
    /// load-bearing: flag evaluation sits on the request path and must
    /// degrade to defaults quickly when the backend is unreachable.
    pub fn new(base_url: &str, namespace: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            namespace: namespace.to_string(),
        })
    }

    async fn boolean_request(
        &self,
        flag_key: &str,
        entity_id: &str,
        context: &FlagContext,
    ) -> Result<BooleanEvaluation, reqwest::Error> {
        let url = format!("{}/evaluate/v1/boolean", self.base_url);
        let body = EvaluationRequest {
            namespace_key: &self.namespace,
            flag_key,
            entity_id,
            context,
        };
        self.http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn variant_request(
        &self,
        flag_key: &str,
        entity_id: &str,
        context: &FlagContext,
    ) -> Result<VariantEvaluation, reqwest::Error> {
        let url = format!("{}/evaluate/v1/variant", self.base_url);
        let body = EvaluationRequest {
            namespace_key: &self.namespace,
            flag_key,
            entity_id,
            context,
        };
        self.http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn evaluate_boolean(
        &self,
        flag_key: &str,
        entity_id: &str,
        context: &FlagContext,
        default: bool,
    ) -> FlagValue<bool> {
        match self.boolean_request(flag_key, entity_id, context).await {
            Ok(eval) => {
                tracing::debug!(
                    flag = flag_key,
                    enabled = eval.enabled,
                    reason = %eval.reason,
                    "boolean flag evaluated"
                );
                FlagValue::resolved(eval.enabled)
            }
            Err(err) => {
                tracing::warn!(
                    flag = flag_key,
                    error = %err,
                    default,
                    "boolean flag evaluation failed, applying default"
                );
                FlagValue::fallback(default)
            }
        }
    }

    pub async fn evaluate_variant(
        &self,
        flag_key: &str,
        entity_id: &str,
        context: &FlagContext,
        default: &str,
    ) -> FlagValue<String> {
        match self.variant_request(flag_key, entity_id, context).await {
            Ok(eval) if !eval.variant_key.is_empty() => {
                tracing::debug!(
                    flag = flag_key,
                    variant = %eval.variant_key,
                    reason = %eval.reason,
                    "variant flag evaluated"
                );
                FlagValue::resolved(eval.variant_key)
            }
            Ok(_) => FlagValue::fallback(default.to_string()),
            Err(err) => {
                tracing::warn!(
                    flag = flag_key,
                    error = %err,
                    default,
                    "variant flag evaluation failed, applying default"
                );
                FlagValue::fallback(default.to_string())
            }
        }
    }

    pub async fn price_display_strategy(
        &self,
        entity_id: &str,
        context: &FlagContext,
    ) -> FlagValue<String> {
        self.evaluate_variant(PRICE_DISPLAY_STRATEGY, entity_id, context, "per-night")
            .await
    }

    pub async fn real_time_availability(
        &self,
        entity_id: &str,
        context: &FlagContext,
    ) -> FlagValue<bool> {
        self.evaluate_boolean(REAL_TIME_AVAILABILITY, entity_id, context, true)
            .await
    }

    pub async fn loyalty_program(&self, entity_id: &str, context: &FlagContext) -> FlagValue<bool> {
        self.evaluate_boolean(LOYALTY_PROGRAM, entity_id, context, false)
            .await
    }

    pub async fn instant_booking(&self, entity_id: &str, context: &FlagContext) -> FlagValue<bool> {
        self.evaluate_boolean(INSTANT_BOOKING, entity_id, context, false)
            .await
    }

    pub async fn similar_hotels(&self, entity_id: &str, context: &FlagContext) -> FlagValue<bool> {
        self.evaluate_boolean(SIMILAR_HOTELS, entity_id, context, false)
            .await
    }

    /// Probe the backend's health endpoint. Used by our own /health to
    /// report connectivity; failures are just `false`, never errors.
    pub async fn is_connected(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
