//! Per-request correlation id.
//!
//! The trace middleware runs each request inside [`TraceId::scope`], and
//! [`crate::domain::Error`] reads the id back through [`TraceId::current`]
//! when it is built. The value is a tokio task-local, so it does not follow
//! work handed to `tokio::spawn`.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Correlation id shared by a request's log lines and error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the enclosing request, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    ///
    /// # Examples
    /// ```
    /// use foodapp::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn inner_scope_shadows_outer() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;

        assert_eq!(seen, (Some(inner), Some(outer)));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("not-a-trace", false)]
    #[case("", false)]
    fn parses_uuid_text(#[case] raw: &str, #[case] valid: bool) {
        let parsed = raw.parse::<TraceId>();

        assert_eq!(parsed.is_ok(), valid);
        if let Ok(id) = parsed {
            assert_eq!(id.to_string(), raw);
        }
    }
}
