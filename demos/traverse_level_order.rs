use avl_search_tree::AvlTree;

fn main() {
    stderrlog::new().verbosity(4).init().ok();

    let mut tree = AvlTree::new();
    for key in 1..=6 {
        tree.insert(key);
    }

    println!("Level-order traversal:");
    tree.traverse_level_order(|key| {
        println!("Key: {}", key);
    });
}
