//! End-to-end browsing through the public API

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arcnav::{
    ArchiveEntry, ArchiveTree, Config, EntryIcon, Error, IconCache, Limits, Navigator,
    TypeProvider, aggregate, build_tree, list,
};

struct CountingProvider(Arc<AtomicUsize>);

impl TypeProvider for CountingProvider {
    fn type_description(&self, extension: &str) -> String {
        self.0.fetch_add(1, Ordering::SeqCst);
        format!("{} document", extension.trim_start_matches('.'))
    }

    fn icon_for_extension(&self, _extension: &str) -> Option<Vec<u8>> {
        Some(vec![0x89, b'P', b'N', b'G'])
    }
}

fn sample_tree() -> ArchiveTree {
    ArchiveTree::from_entries(
        "sample.par",
        vec![
            ArchiveEntry::new("docs/a.txt".to_string(), false, 100).with_compressed_size(40),
            ArchiveEntry::new("docs/b.bin".to_string(), false, 0).with_compressed_size(0),
            ArchiveEntry::new("docs/notes/c.txt".to_string(), false, 50).with_compressed_size(50),
            ArchiveEntry::new("media/".to_string(), true, 0),
            ArchiveEntry::new("media/clip.TXT".to_string(), false, 10).with_compressed_size(3),
        ],
    )
    .unwrap()
}

fn navigator(calls: &Arc<AtomicUsize>) -> Navigator {
    let icons = Arc::new(IconCache::new(CountingProvider(Arc::clone(calls))));
    Navigator::new(icons, &Config::default())
}

#[test]
fn test_docs_scenario() {
    let mut tree = ArchiveTree::new("scenario.par");
    let docs = tree.add_folder(tree.contents_root(), "docs").unwrap();
    tree.add_file(
        docs,
        "a.txt",
        arcnav::FileMeta::new(100, 40, chrono::DateTime::<chrono::Utc>::UNIX_EPOCH),
    )
    .unwrap();
    tree.add_file(
        docs,
        "b.bin",
        arcnav::FileMeta::new(0, 0, chrono::DateTime::<chrono::Utc>::UNIX_EPOCH),
    )
    .unwrap();

    let icons = IconCache::with_mime_types();
    let top = list(&tree, tree.contents_root(), &icons, Limits::default()).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "docs");
    assert_eq!(top[0].decompressed_size, 100);
    assert_eq!(top[0].compressed_size, 40);
    assert_eq!(top[0].compression_ratio_percent, Some(40));

    let inner = list(&tree, docs, &icons, Limits::default()).unwrap();
    assert_eq!(inner.len(), 2);
    assert_eq!(inner[0].compression_ratio_percent, Some(40));
    assert_eq!(inner[1].compression_ratio_percent, None);
}

#[test]
fn test_aggregate_matches_sum_of_files() {
    let tree = sample_tree();
    let totals = aggregate(&tree, tree.contents_root(), Limits::default()).unwrap();
    assert_eq!(totals.decompressed, 160);
    assert_eq!(totals.compressed, 93);
}

#[test]
fn test_listing_preserves_child_order() {
    let tree = sample_tree();
    let icons = IconCache::with_mime_types();
    let root = tree.node(tree.contents_root()).unwrap();
    let rows = list(&tree, tree.contents_root(), &icons, Limits::default()).unwrap();
    assert_eq!(rows.len(), root.children().len());
    for (row, &child) in rows.iter().zip(root.children()) {
        assert_eq!(row.node, child);
    }
}

#[test]
fn test_tree_build_is_repeatable() {
    let tree = sample_tree();
    let first = build_tree(&tree, tree.contents_root(), Limits::default()).unwrap();
    let second = build_tree(&tree, tree.contents_root(), Limits::default()).unwrap();
    assert!(first.same_structure(&second));
    assert_eq!(first.node_count(), 4);
}

#[test]
fn test_browse_session() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut nav = navigator(&calls);
    nav.open_archive(sample_tree()).unwrap();

    let docs = nav.listing()[0].node;
    let media = nav.listing()[1].node;

    nav.enter(docs).unwrap();
    let notes = nav
        .listing()
        .iter()
        .find(|r| r.name == "notes")
        .map(|r| r.node)
        .unwrap();
    nav.enter(notes).unwrap();
    assert_eq!(nav.current_path().unwrap(), "docs/notes");
    assert!(nav.listing().iter().all(|r| r.relative_directory == "docs/notes/"));

    nav.go_back().unwrap();
    nav.go_back().unwrap();
    assert!(nav.affordances().can_go_forward);
    assert!(!nav.affordances().can_go_back);

    nav.enter(media).unwrap();
    assert!(!nav.affordances().can_go_forward);
    assert!(matches!(nav.go_forward(), Err(Error::EmptyHistory(_))));

    let clip = &nav.listing()[0];
    assert_eq!(clip.type_label, "txt document");
    assert!(matches!(clip.icon, EntryIcon::Resolved(_)));

    // .txt was already resolved in docs; .TXT maps to the same entry
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    nav.close_archive().unwrap();
    assert!(matches!(nav.go_up(), Err(Error::NoArchiveOpen)));
}
