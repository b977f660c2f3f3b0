use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};

/// A query root candidate selection strategies are evaluated against.
///
/// The document scope is the frame-level [`Client`]; the element scope is a
/// single listing [`Element`]. Both answer the same contract, so the one
/// resolver below serves container discovery and per-field lookups alike.
#[allow(async_fn_in_trait)]
pub trait Scope {
    type Node;

    /// Return every node matching `css` under this scope.
    /// An empty result is a valid outcome, not an error.
    async fn query(&self, css: &str) -> Result<Vec<Self::Node>, CmdError>;
}

impl Scope for Client {
    type Node = Element;

    async fn query(&self, css: &str) -> Result<Vec<Element>, CmdError> {
        self.find_all(Locator::Css(css)).await
    }
}

impl Scope for Element {
    type Node = Element;

    async fn query(&self, css: &str) -> Result<Vec<Element>, CmdError> {
        self.find_all(Locator::Css(css)).await
    }
}

/// Outcome of resolving an ordered strategy list against a scope
#[derive(Debug)]
pub struct Resolution<N> {
    /// Nodes produced by the first strategy that matched anything
    pub nodes: Vec<N>,

    /// The strategy that matched, if any
    pub selector: Option<&'static str>,
}

impl<N> Resolution<N> {
    /// The valid "nothing found" outcome
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            selector: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Evaluate `strategies` strictly in order and return the first one that
/// yields at least one node. No scoring, no merging across strategies;
/// later strategies are never evaluated once one has matched.
pub async fn resolve<S: Scope>(
    scope: &S,
    strategies: &[&'static str],
) -> Result<Resolution<S::Node>, CmdError> {
    for &css in strategies {
        let nodes = scope.query(css).await?;
        if !nodes.is_empty() {
            ::log::debug!("selector '{}' matched {} node(s)", css, nodes.len());
            return Ok(Resolution {
                nodes,
                selector: Some(css),
            });
        }
    }
    Ok(Resolution::empty())
}

/// Resolve and keep only the first node, for single-node field chains
pub async fn resolve_first<S: Scope>(
    scope: &S,
    strategies: &[&'static str],
) -> Result<Option<S::Node>, CmdError> {
    Ok(resolve(scope, strategies).await?.nodes.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scope stub that answers from a fixed selector->count table and
    /// records the order strategies were evaluated in
    struct StubScope {
        hits: HashMap<&'static str, usize>,
        evaluated: Mutex<Vec<String>>,
    }

    impl StubScope {
        fn new(hits: &[(&'static str, usize)]) -> Self {
            Self {
                hits: hits.iter().copied().collect(),
                evaluated: Mutex::new(Vec::new()),
            }
        }

        fn evaluated(&self) -> Vec<String> {
            self.evaluated.lock().unwrap().clone()
        }
    }

    impl Scope for StubScope {
        type Node = usize;

        async fn query(&self, css: &str) -> Result<Vec<usize>, CmdError> {
            self.evaluated.lock().unwrap().push(css.to_string());
            let count = self.hits.get(css).copied().unwrap_or(0);
            Ok((0..count).collect())
        }
    }

    #[tokio::test]
    async fn first_matching_strategy_wins() {
        let scope = StubScope::new(&[(".a", 0), (".b", 2), (".c", 5)]);
        let resolution = resolve(&scope, &[".a", ".b", ".c"]).await.unwrap();

        assert_eq!(resolution.nodes.len(), 2);
        assert_eq!(resolution.selector, Some(".b"));
    }

    #[tokio::test]
    async fn later_strategies_are_never_evaluated() {
        let scope = StubScope::new(&[(".a", 0), (".b", 2), (".c", 5)]);
        resolve(&scope, &[".a", ".b", ".c"]).await.unwrap();

        assert_eq!(scope.evaluated(), vec![".a".to_string(), ".b".to_string()]);
    }

    #[tokio::test]
    async fn all_strategies_empty_is_a_valid_outcome() {
        let scope = StubScope::new(&[]);
        let resolution = resolve(&scope, &[".a", ".b"]).await.unwrap();

        assert!(resolution.is_empty());
        assert_eq!(resolution.selector, None);
    }

    #[tokio::test]
    async fn resolve_first_takes_the_first_node_of_the_match() {
        let scope = StubScope::new(&[(".a", 3)]);
        let first = resolve_first(&scope, &[".a"]).await.unwrap();

        assert_eq!(first, Some(0));
    }

    #[tokio::test]
    async fn resolve_first_reports_a_miss_as_none() {
        let scope = StubScope::new(&[]);
        let first = resolve_first(&scope, &[".missing"]).await.unwrap();

        assert_eq!(first, None);
    }
}
