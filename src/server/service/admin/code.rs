//! One-time admin bootstrap code.
//!
//! When the store starts without any admin account, `startup::check_for_admin` issues a
//! random code and logs it. Supplying that code on registration or login promotes the
//! account to admin. Codes live in memory only, expire after a short TTL and are consumed
//! by their first successful use.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default lifetime of an issued code.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(60);

const CODE_LENGTH: usize = 32;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                              abcdefghijklmnopqrstuvwxyz\
                              0123456789";

#[derive(Clone)]
struct IssuedCode {
    code: String,
    expires_at: Instant,
}

impl IssuedCode {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Shared holder for the current bootstrap code.
///
/// Cloning shares the same slot, so the copy in `AppState` and the one used at startup
/// see the same code.
#[derive(Clone)]
pub struct AdminCodeService {
    slot: Arc<RwLock<Option<IssuedCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes live for `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Issues a fresh 32-character alphanumeric code, replacing any previous one.
    pub async fn issue(&self) -> String {
        let code = random_code();
        *self.slot.write().await = Some(IssuedCode {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        code
    }

    /// Consumes the code if `input` matches and it has not expired.
    ///
    /// A wrong guess leaves the code in place; an expired code is dropped.
    ///
    /// # Returns
    /// - `true` - Code matched and is now consumed
    /// - `false` - No code issued, code expired, or mismatch
    pub async fn redeem(&self, input: &str) -> bool {
        let mut slot = self.slot.write().await;

        match slot.as_ref() {
            Some(issued) if issued.is_expired() => {
                *slot = None;
                false
            }
            Some(issued) if issued.code == input => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Whether an unexpired code is waiting to be redeemed.
    #[cfg(test)]
    pub async fn is_pending(&self) -> bool {
        self.slot
            .read()
            .await
            .as_ref()
            .is_some_and(|issued| !issued.is_expired())
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

fn random_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}
