use avl_search_tree::AvlTree;

fn main() {
    stderrlog::new().verbosity(4).init().ok();

    let mut tree = AvlTree::new();
    tree.insert(0);
    tree.insert(1);
    tree.insert(2);
    assert!(!tree.insert(2));
    tree.insert(3);
    tree.insert(4);
    tree.insert(5);
    assert!(tree.contains(&1));
    tree.remove(&1);
    assert!(!tree.contains(&1));
    assert_eq!(tree.len(), 5);

    print!("{{ ");
    for key in &tree {
        print!("{key}, ");
    }
    println!("}}");
    println!("height: {}", tree.height());
}
