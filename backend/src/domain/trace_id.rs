//! Correlation id for one HTTP request.
//!
//! The id lives in a Tokio task-local while the request is served, so
//! [`Error`](crate::domain::Error) values and log lines can pick it up
//! without every service taking it as a parameter. Spawned tasks do not
//! inherit it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying a single request.
///
/// # Examples
/// ```
/// use gradebook::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::adopt_or_generate(Some("7f1c1d9e-0a1b-4c2d-8e3f-405162738495"));
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// assert_eq!(id.to_string(), "7f1c1d9e-0a1b-4c2d-8e3f-405162738495");
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a caller-supplied id when it is a UUID, otherwise make one.
    ///
    /// Lets a proxy in front of the node keep one id across hops.
    #[must_use]
    pub fn adopt_or_generate(supplied: Option<&str>) -> Self {
        supplied
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Id of the request being served on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current trace id.
    pub async fn scope<Fut: Future>(id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
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
    async fn scope_sets_and_nests() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let (during, nested) = TraceId::scope(outer, async move {
            let during = TraceId::current();
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (during, nested)
        })
        .await;

        assert_eq!(during, Some(outer));
        assert_eq!(nested, Some(inner));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[case(Some(" 00000000-0000-0000-0000-000000000001 "), true)]
    #[case(Some("not-a-uuid"), false)]
    #[case(None, false)]
    fn supplied_ids_are_adopted_only_when_valid(
        #[case] supplied: Option<&str>,
        #[case] adopted: bool,
    ) {
        let id = TraceId::adopt_or_generate(supplied);
        assert_eq!(
            id.to_string() == "00000000-0000-0000-0000-000000000001",
            adopted
        );
    }
}
