pub mod discovery_tree;
