//! Position and history over an open archive
//!
//! Every position change goes through [`Navigator`]. A transition computes
//! the new listing first and only then commits, so a failed move leaves the
//! previous position, listing and history untouched.

mod history;

use std::sync::Arc;

pub use history::History;

use crate::aggregate::Limits;
use crate::archive::{ArchiveTree, EntryNode, NodeId};
use crate::config::Config;
use crate::error::{Direction, Error, Result};
use crate::icons::IconCache;
use crate::listing::{self, DirectoryEntryView};
use crate::tree::{self, DirectoryTreeNode};

/// Which navigation controls are currently usable
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Affordances {
    pub can_go_up: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Outcome of activating a listing row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Entered,
    /// Files are not a position; the caller decides what opening one means
    File(NodeId),
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Enter(NodeId),
    Back,
    Forward,
}

impl Step {
    fn label(self) -> &'static str {
        match self {
            Step::Enter(_) => "enter",
            Step::Back => "back",
            Step::Forward => "forward",
        }
    }
}

struct Session {
    tree: ArchiveTree,
    current: NodeId,
    history: History,
    listing: Vec<DirectoryEntryView>,
    panel: DirectoryTreeNode,
    affordances: Affordances,
}

impl Session {
    fn refresh_affordances(&mut self) {
        let can_go_up = self
            .tree
            .node(self.current)
            .map(|n| n.parent().is_some() && !n.is_synthetic_root())
            .unwrap_or(false);
        self.affordances = Affordances {
            can_go_up,
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
        };
    }
}

pub struct Navigator {
    icons: Arc<IconCache>,
    limits: Limits,
    history_limit: usize,
    session: Option<Session>,
}

impl Navigator {
    pub fn new(icons: Arc<IconCache>, config: &Config) -> Self {
        Self {
            icons,
            limits: config.limits(),
            history_limit: config.history_limit,
            session: None,
        }
    }

    /// Replace whatever is open with `tree`, starting at its first child.
    ///
    /// On failure the navigator ends up closed.
    pub fn open_archive(&mut self, tree: ArchiveTree) -> Result<()> {
        self.session = None;

        let root = tree.node(tree.root())?;
        let Some(&start) = root.children().first() else {
            return Err(Error::CorruptTree(format!("archive '{}' has no entries", root.name())));
        };
        let listing = listing::list(&tree, start, &self.icons, self.limits)?;
        let panel = tree::build_panel(&tree, start, self.limits)?;

        log::info!("opened archive '{}' ({} nodes)", root.name(), tree.len());

        let mut session = Session {
            tree,
            current: start,
            history: History::new(self.history_limit),
            listing,
            panel,
            affordances: Affordances::default(),
        };
        session.refresh_affordances();
        self.session = Some(session);
        Ok(())
    }

    pub fn close_archive(&mut self) -> Result<()> {
        let session = self.session.take().ok_or(Error::NoArchiveOpen)?;
        if let Ok(root) = session.tree.node(session.tree.root()) {
            log::info!("closed archive '{}'", root.name());
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn tree(&self) -> Option<&ArchiveTree> {
        self.session.as_ref().map(|s| &s.tree)
    }

    pub fn current(&self) -> Option<NodeId> {
        self.session.as_ref().map(|s| s.current)
    }

    pub fn current_node(&self) -> Option<&EntryNode> {
        let session = self.session.as_ref()?;
        session.tree.node(session.current).ok()
    }

    /// Path of the current folder below the archive top
    pub fn current_path(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        session.tree.relative_path(session.current).ok()
    }

    /// Rows for the current folder; empty when closed
    pub fn listing(&self) -> &[DirectoryEntryView] {
        self.session
            .as_ref()
            .map(|s| s.listing.as_slice())
            .unwrap_or(&[])
    }

    pub fn directory_tree(&self) -> Option<&DirectoryTreeNode> {
        self.session.as_ref().map(|s| &s.panel)
    }

    pub fn directory_tree_mut(&mut self) -> Option<&mut DirectoryTreeNode> {
        self.session.as_mut().map(|s| &mut s.panel)
    }

    pub fn history(&self) -> Option<&History> {
        self.session.as_ref().map(|s| &s.history)
    }

    pub fn affordances(&self) -> Affordances {
        self.session
            .as_ref()
            .map(|s| s.affordances)
            .unwrap_or_default()
    }

    /// Move into a folder, discarding forward history
    pub fn enter(&mut self, node: NodeId) -> Result<()> {
        self.transition(Step::Enter(node))
    }

    /// Enter a folder, or hand a file back to the caller untouched
    pub fn activate(&mut self, node: NodeId) -> Result<Activation> {
        let session = self.session.as_ref().ok_or(Error::NoArchiveOpen)?;
        if session.tree.node(node)?.is_container() {
            self.enter(node)?;
            Ok(Activation::Entered)
        } else {
            Ok(Activation::File(node))
        }
    }

    pub fn go_up(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or(Error::NoArchiveOpen)?;
        let current = session.tree.node(session.current)?;
        let parent = match current.parent() {
            Some(parent) if !current.is_synthetic_root() => parent,
            _ => return Err(Error::AtArchiveRoot),
        };
        self.transition(Step::Enter(parent))
    }

    pub fn go_back(&mut self) -> Result<()> {
        self.transition(Step::Back)
    }

    pub fn go_forward(&mut self) -> Result<()> {
        self.transition(Step::Forward)
    }

    fn transition(&mut self, step: Step) -> Result<()> {
        let session = self.session.as_mut().ok_or(Error::NoArchiveOpen)?;
        let target = match step {
            Step::Enter(node) => node,
            Step::Back => session
                .history
                .peek_previous()
                .ok_or(Error::EmptyHistory(Direction::Back))?,
            Step::Forward => session
                .history
                .peek_next()
                .ok_or(Error::EmptyHistory(Direction::Forward))?,
        };

        let listing = listing::list(&session.tree, target, &self.icons, self.limits)?;

        let old = session.current;
        match step {
            Step::Enter(_) => {
                session.history.push_previous(old);
                session.history.clear_next();
            }
            Step::Back => {
                session.history.pop_previous();
                session.history.push_next(old);
            }
            Step::Forward => {
                session.history.pop_next();
                session.history.push_previous(old);
            }
        }
        session.current = target;
        session.listing = listing;
        session.refresh_affordances();

        log::debug!(
            "{}: now at '{}' (back {}, forward {})",
            step.label(),
            session.tree.relative_path(target).unwrap_or_default(),
            session.history.previous_len(),
            session.history.next_len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::FileMeta;
    use crate::icons::TypeProvider;
    use chrono::{DateTime, Utc};

    struct NullProvider;

    impl TypeProvider for NullProvider {
        fn type_description(&self, extension: &str) -> String {
            extension.to_string()
        }

        fn icon_for_extension(&self, _extension: &str) -> Option<Vec<u8>> {
            None
        }
    }

    struct Fixture {
        nav: Navigator,
        a: NodeId,
        b: NodeId,
        c: NodeId,
        file: NodeId,
    }

    /// `.` holds `a/b`, `c` and `file.txt`
    fn fixture_with(config: &Config) -> Fixture {
        let mut tree = ArchiveTree::new("test.par");
        let root = tree.contents_root();
        let a = tree.add_folder(root, "a").unwrap();
        let b = tree.add_folder(a, "b").unwrap();
        let c = tree.add_folder(root, "c").unwrap();
        let file = tree
            .add_file(root, "file.txt", FileMeta::new(10, 5, DateTime::<Utc>::UNIX_EPOCH))
            .unwrap();

        let mut nav = Navigator::new(Arc::new(IconCache::new(NullProvider)), config);
        nav.open_archive(tree).unwrap();
        Fixture { nav, a, b, c, file }
    }

    fn fixture() -> Fixture {
        fixture_with(&Config::default())
    }

    #[test]
    fn test_open_starts_at_synthetic_root() {
        let f = fixture();
        let tree = f.nav.tree().unwrap();
        assert_eq!(f.nav.current(), Some(tree.contents_root()));
        assert_eq!(f.nav.listing().len(), 3);
        assert_eq!(f.nav.affordances(), Affordances::default());
        assert_eq!(f.nav.directory_tree().unwrap().children().len(), 2);
    }

    #[test]
    fn test_closed_navigator_rejects_moves() {
        let mut nav = Navigator::new(Arc::new(IconCache::new(NullProvider)), &Config::default());
        assert!(matches!(nav.go_back(), Err(Error::NoArchiveOpen)));
        assert!(matches!(nav.go_up(), Err(Error::NoArchiveOpen)));
        assert!(matches!(nav.close_archive(), Err(Error::NoArchiveOpen)));
        assert!(nav.listing().is_empty());
    }

    #[test]
    fn test_enter_then_back_then_forward() {
        let mut f = fixture();
        let start = f.nav.current().unwrap();

        f.nav.enter(f.a).unwrap();
        assert_eq!(f.nav.current(), Some(f.a));
        assert!(f.nav.affordances().can_go_back);

        f.nav.go_back().unwrap();
        assert_eq!(f.nav.current(), Some(start));
        assert_eq!(f.nav.history().unwrap().peek_next(), Some(f.a));
        assert!(f.nav.affordances().can_go_forward);

        f.nav.go_forward().unwrap();
        assert_eq!(f.nav.current(), Some(f.a));
        assert!(!f.nav.affordances().can_go_forward);
        assert_eq!(f.nav.history().unwrap().peek_previous(), Some(start));
    }

    #[test]
    fn test_enter_clears_forward_history() {
        let mut f = fixture();
        f.nav.enter(f.a).unwrap();
        f.nav.go_back().unwrap();
        assert_eq!(f.nav.history().unwrap().next_len(), 1);

        f.nav.enter(f.c).unwrap();
        assert_eq!(f.nav.history().unwrap().next_len(), 0);
        assert_eq!(f.nav.history().unwrap().previous_len(), 1);
    }

    #[test]
    fn test_go_up() {
        let mut f = fixture();
        f.nav.enter(f.a).unwrap();
        f.nav.enter(f.b).unwrap();
        assert!(f.nav.affordances().can_go_up);

        f.nav.go_back().unwrap();
        f.nav.go_forward().unwrap();
        f.nav.go_back().unwrap();
        assert_eq!(f.nav.current(), Some(f.a));

        f.nav.go_up().unwrap();
        let root = f.nav.tree().unwrap().contents_root();
        assert_eq!(f.nav.current(), Some(root));
        // up behaves like entering the parent
        assert_eq!(f.nav.history().unwrap().next_len(), 0);
        assert_eq!(f.nav.history().unwrap().peek_previous(), Some(f.a));
        assert!(!f.nav.affordances().can_go_up);
    }

    #[test]
    fn test_go_up_at_root_fails() {
        let mut f = fixture();
        let before = f.nav.current();
        assert!(matches!(f.nav.go_up(), Err(Error::AtArchiveRoot)));
        assert_eq!(f.nav.current(), before);
        assert!(!f.nav.affordances().can_go_back);
    }

    #[test]
    fn test_empty_history() {
        let mut f = fixture();
        assert!(matches!(
            f.nav.go_back(),
            Err(Error::EmptyHistory(Direction::Back))
        ));
        assert!(matches!(
            f.nav.go_forward(),
            Err(Error::EmptyHistory(Direction::Forward))
        ));
    }

    #[test]
    fn test_enter_file_is_not_a_move() {
        let mut f = fixture();
        let before = f.nav.current();
        assert!(matches!(
            f.nav.enter(f.file),
            Err(Error::NotAContainer { .. })
        ));
        assert_eq!(f.nav.current(), before);
        assert!(!f.nav.affordances().can_go_back);

        assert_eq!(f.nav.activate(f.file).unwrap(), Activation::File(f.file));
        assert_eq!(f.nav.current(), before);
        assert_eq!(f.nav.activate(f.c).unwrap(), Activation::Entered);
        assert_eq!(f.nav.current(), Some(f.c));
    }

    #[test]
    fn test_reopen_discards_state() {
        let mut f = fixture();
        f.nav.enter(f.a).unwrap();
        f.nav.enter(f.b).unwrap();

        let other = ArchiveTree::new("other.par");
        let other_root = other.contents_root();
        f.nav.open_archive(other).unwrap();

        assert_eq!(f.nav.current(), Some(other_root));
        assert_eq!(f.nav.history().unwrap().previous_len(), 0);
        assert!(f.nav.listing().is_empty());
        // ids from the replaced archive are rejected
        assert!(matches!(f.nav.enter(f.a), Err(Error::StaleNode)));
    }

    #[test]
    fn test_close_clears_everything() {
        let mut f = fixture();
        f.nav.enter(f.a).unwrap();
        f.nav.close_archive().unwrap();
        assert!(!f.nav.is_open());
        assert!(f.nav.current().is_none());
        assert!(f.nav.directory_tree().is_none());
        assert_eq!(f.nav.affordances(), Affordances::default());
        assert!(matches!(f.nav.enter(f.a), Err(Error::NoArchiveOpen)));
    }

    #[test]
    fn test_history_limit() {
        let config = Config {
            history_limit: 2,
            ..Config::default()
        };
        let mut f = fixture_with(&config);
        f.nav.enter(f.a).unwrap();
        f.nav.enter(f.b).unwrap();
        f.nav.enter(f.a).unwrap();
        f.nav.enter(f.c).unwrap();
        assert_eq!(f.nav.history().unwrap().previous_len(), 2);
        f.nav.go_back().unwrap();
        f.nav.go_back().unwrap();
        assert_eq!(f.nav.current(), Some(f.b));
        assert!(!f.nav.affordances().can_go_back);
    }

    #[test]
    fn test_failed_open_leaves_closed() {
        let mut f = fixture();
        let mut tree = ArchiveTree::new("deep.par");
        let mut parent = tree.contents_root();
        for i in 0..4 {
            parent = tree.add_folder(parent, &format!("d{i}")).unwrap();
        }
        let config = Config {
            max_depth: 2,
            ..Config::default()
        };
        f.nav = Navigator::new(Arc::new(IconCache::new(NullProvider)), &config);
        assert!(matches!(f.nav.open_archive(tree), Err(Error::CorruptTree(_))));
        assert!(!f.nav.is_open());
    }
}
