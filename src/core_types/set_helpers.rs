use super::*;

/// Create a `BitSet` from a list of elements.
///
/// ## Example
/// ```
/// #[macro_use] extern crate fbas_network;
///
/// let set = bitset!{23, 42};
/// assert!(set.contains(23));
/// assert!(set.contains(42));
/// assert!(!set.contains(100));
/// ```
#[macro_export]
macro_rules! bitset {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(bitset!(@single $rest)),*]));

    () => { ::bit_set::BitSet::new() };
    ($($key:expr,)+) => { bitset!($($key),+) };
    ($($key:expr),*) => {
        {
            let _cap = bitset!(@count $($key),*);
            let mut _set = ::bit_set::BitSet::with_capacity(_cap);
            $(
                let _ = _set.insert($key);
            )*
            _set
        }
    };
}

/// Create a `Vec<BitSet>` from a list of sets.
///
/// ## Example
/// ```
/// #[macro_use] extern crate fbas_network;
///
/// let actual = bitsetvec![[0, 1], [23, 42]];
/// let expected = vec![bitset![0, 1], bitset![23, 42]];
/// assert_eq!(expected, actual);
/// ```
#[macro_export]
macro_rules! bitsetvec {
    ($($setcontent:tt),*) => {
        {
            vec![
            $(
                bitset!$setcontent
            ),*
            ]
        }
    };
}

/// Maps each node to the index of the set containing it. Nodes not covered by `partition` are
/// mapped to `usize::MAX`.
pub fn partition_ids(partition: &[NodeIdSet], number_of_nodes: usize) -> Vec<usize> {
    let mut ids = vec![usize::MAX; number_of_nodes];
    for (set_id, node_set) in partition.iter().enumerate() {
        for node_id in node_set.iter() {
            ids[node_id] = set_id;
        }
    }
    ids
}

/// All node IDs below `number_of_nodes` that are not in `node_set`.
pub fn complement(node_set: &NodeIdSet, number_of_nodes: usize) -> NodeIdSet {
    (0..number_of_nodes)
        .filter(|&node_id| !node_set.contains(node_id))
        .collect()
}
