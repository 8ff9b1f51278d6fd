//! Walking an error chain one node at a time.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::annotate::Marked;
use crate::capability::CauseProbe;

/// Iterator over an error chain, outermost node first.
///
/// Created by [`Classifier::chain`](crate::Classifier::chain). Each step follows
/// the node's unwrap relation and falls back to the registered
/// [`Cause`](crate::Cause) accessors only when there is none.
///
/// # Examples
///
/// ```
/// use transience::{make_temporary, Classifier};
///
/// let err = make_temporary("initial error");
/// let classifier = Classifier::new();
/// let root = classifier.chain(&err).last().unwrap();
/// assert_eq!(root.to_string(), "initial error");
/// ```
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
    causes: &'a [CauseProbe],
}

impl<'a> Chain<'a> {
    pub(crate) fn new(err: &'a (dyn StdError + 'static), causes: &'a [CauseProbe]) -> Self {
        Chain {
            next: Some(err),
            causes,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = next_node(current, self.causes);
        Some(current)
    }
}

impl fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("next", &self.next)
            .field("causes", &self.causes.len())
            .finish()
    }
}

fn next_node<'a>(
    err: &'a (dyn StdError + 'static),
    causes: &[CauseProbe],
) -> Option<&'a (dyn StdError + 'static)> {
    unwrap(err).or_else(|| causes.iter().find_map(|probe| probe(err)))
}

// `io::Error`, `Box<T>` and `Arc<T>` forward `source()` to the error they
// hold, which would skip that error entirely. Step into the held error instead.
fn unwrap<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    if let Some(io_err) = err.downcast_ref::<io::Error>() {
        return io_err
            .get_ref()
            .map(|inner| inner as &(dyn StdError + 'static));
    }
    if let Some(shared) = err.downcast_ref::<Arc<dyn StdError + Send + Sync>>() {
        let inner: &(dyn StdError + 'static) = &**shared;
        return Some(inner);
    }
    if let Some(shared) = err.downcast_ref::<Arc<dyn StdError + Send>>() {
        let inner: &(dyn StdError + 'static) = &**shared;
        return Some(inner);
    }
    if let Some(shared) = err.downcast_ref::<Arc<dyn StdError>>() {
        return Some(&**shared);
    }
    held::<Marked>(err)
        .or_else(|| held::<io::Error>(err))
        .or_else(|| err.source())
}

/// The error behind a `Box<T>` or `Arc<T>` node.
fn held<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)>
where
    T: StdError + 'static,
{
    if let Some(boxed) = err.downcast_ref::<Box<T>>() {
        let inner: &(dyn StdError + 'static) = &**boxed;
        return Some(inner);
    }
    err.downcast_ref::<Arc<T>>()
        .map(|shared| &**shared as &(dyn StdError + 'static))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{make_permanent, make_temporary};

    fn messages(err: &(dyn StdError + 'static)) -> Vec<String> {
        Chain::new(err, &[]).map(|node| node.to_string()).collect()
    }

    #[test]
    fn test_single_node() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(messages(&err), vec!["entity not found"]);
    }

    #[test]
    fn test_follows_source() {
        let err = make_permanent(make_temporary("root"));
        assert_eq!(messages(&err), vec!["root", "root", "root"]);
        assert_eq!(Chain::new(&err, &[]).count(), 3);
    }

    #[test]
    fn test_steps_into_io_payload() {
        let err = io::Error::new(io::ErrorKind::Other, make_temporary("payload"));
        let nodes: Vec<_> = Chain::new(&err, &[]).collect();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[1].downcast_ref::<Marked>().is_some());
    }

    #[test]
    fn test_steps_into_arc() {
        let shared: Arc<dyn StdError + Send + Sync> = Arc::new(make_temporary("shared"));
        let nodes: Vec<_> = Chain::new(&shared, &[]).collect();
        assert!(nodes[0].downcast_ref::<Arc<dyn StdError + Send + Sync>>().is_some());
        assert!(nodes[1].downcast_ref::<Marked>().is_some());
    }

    #[test]
    fn test_steps_into_arc_without_send_sync() {
        let shared: Arc<dyn StdError> = Arc::new(make_temporary("local"));
        let nodes: Vec<_> = Chain::new(&shared, &[]).collect();
        assert!(nodes[1].downcast_ref::<Marked>().is_some());

        let shared: Arc<dyn StdError + Send> = Arc::new(make_permanent("sendable"));
        let nodes: Vec<_> = Chain::new(&shared, &[]).collect();
        assert!(nodes[1].downcast_ref::<Marked>().is_some());
    }

    #[test]
    fn test_steps_into_boxed_and_shared_marker() {
        let boxed = Box::new(make_temporary("boxed"));
        let nodes: Vec<_> = Chain::new(&boxed, &[]).collect();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[1].downcast_ref::<Marked>().is_some());

        let shared = Arc::new(make_temporary("shared"));
        let nodes: Vec<_> = Chain::new(&shared, &[]).collect();
        assert!(nodes[1].downcast_ref::<Marked>().is_some());
    }

    #[test]
    fn test_steps_into_boxed_io_error() {
        let boxed = Box::new(io::Error::from_raw_os_error(5));
        let nodes: Vec<_> = Chain::new(&boxed, &[]).collect();
        assert_eq!(nodes.len(), 2);
        assert!(nodes[1].downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_os_error_is_a_leaf() {
        let err = io::Error::from_raw_os_error(2);
        assert_eq!(Chain::new(&err, &[]).count(), 1);
    }
}
