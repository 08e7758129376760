use serde::{Deserialize, Serialize};

/// Cryptographic key material minted alongside a push subscription,
/// base64url-encoded as the push service hands it out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// A push-service subscription. The platform owns its lifetime; the client
/// only mirrors it to the backend (`POST /notifications/push/subscribe`)
/// and asks the platform to tear it down on unsubscribe.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

/// Response body of `GET /notifications/push/vapid-key`: the server's public
/// key identifying the backend to the push service, base64url-encoded.
#[derive(Deserialize, Debug, Clone)]
pub struct VapidKeyResponse {
    pub public_key: String,
}
