//! The random-access view and the lazy stream must agree tuple for tuple.

use std::collections::{BTreeSet, LinkedList, VecDeque};

use joinery_core::prelude::*;
use proptest::prelude::*;

fn by_unrank<'a, T>(view: &TupleView<'a, [T]>) -> Vec<Vec<&'a T>> {
    (0..view.count()).map(|i| view.get(i).unwrap()).collect()
}

#[test]
fn test_keeps_order_every_policy() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("joinery_core=trace")
        .with_test_writer()
        .try_init();
    let items: Vec<String> = (0..6).map(|i| format!("item{i}")).collect();
    for k in 0..=4 {
        for policy in Policy::ALL {
            let view = join(items.as_slice(), k, policy).unwrap();
            let expected = by_unrank(&view);

            let iterated: Vec<_> = view.iter().collect();
            assert_eq!(iterated, expected, "view k={k} {policy}");

            // A linked list cannot be indexed; only the stream can join it.
            let list: LinkedList<&String> = items.iter().collect();
            let stream = TupleStream::power(&list, k, policy).unwrap();
            assert_eq!(stream.count(), view.count());
            let streamed: Vec<Vec<&String>> = stream
                .iter()
                .map(|t| t.into_iter().copied().collect())
                .collect();
            assert_eq!(streamed, expected, "stream k={k} {policy}");
        }
    }
}

#[test]
fn test_keeps_order_heterogeneous() {
    let a: Vec<i32> = (0..5).collect();
    let b: Vec<i32> = (10..12).collect();
    let c: Vec<i32> = (20..23).collect();
    let view = join_all(&[a.as_slice(), b.as_slice(), c.as_slice()]).unwrap();

    let set_a: BTreeSet<i32> = a.iter().copied().collect();
    let set_b: BTreeSet<i32> = b.iter().copied().collect();
    let set_c: BTreeSet<i32> = c.iter().copied().collect();
    let stream = TupleStream::product(vec![&set_a, &set_b, &set_c]).unwrap();

    assert_eq!(view.count(), 30);
    assert_eq!(stream.count(), 30);
    let expected: Vec<Vec<i32>> = by_unrank(&view)
        .into_iter()
        .map(|t| t.into_iter().copied().collect())
        .collect();
    let streamed: Vec<Vec<i32>> = stream
        .iter()
        .map(|t| t.into_iter().copied().collect())
        .collect();
    assert_eq!(streamed, expected);
    assert_eq!(expected[14], vec![4, 10, 21]);
}

#[test]
fn test_keeps_order_mapped_iterator_source() {
    // A computed source: squares, produced on every pass.
    let squares = (0u64..7).map(|x| x * x);
    let backing: VecDeque<u64> = squares.clone().collect();
    for policy in Policy::ALL {
        let view = join(&backing, 3, policy).unwrap();
        let stream = TupleStream::power(squares.clone(), 3, policy).unwrap();
        let from_view: Vec<Vec<u64>> = view
            .iter()
            .map(|t| t.into_iter().copied().collect())
            .collect();
        let from_stream: Vec<Vec<u64>> = stream.iter().collect();
        assert_eq!(from_stream, from_view, "{policy}");
    }
}

#[test]
fn test_streams_restart_fresh() {
    let stream = TupleStream::power(0..4, 2, Policy::Multiset).unwrap();
    let mut first = stream.iter();
    first.next();
    first.next();
    // An interrupted traversal does not affect a new one.
    let full: Vec<_> = stream.iter().collect();
    assert_eq!(full.len(), 10);
    assert_eq!(full[0], vec![0, 0]);
    assert_eq!(first.next(), Some(full[2].clone()));
}

proptest! {
    /// Property: stream, view iteration and unrank agree for random shapes.
    #[test]
    fn prop_keeps_order(n in 1usize..7, k in 0usize..5, policy in prop::sample::select(Policy::ALL.to_vec())) {
        let source: Vec<usize> = (0..n).collect();
        let view = join(source.as_slice(), k, policy).unwrap();
        let stream = TupleStream::power(0..n, k, policy).unwrap();
        prop_assert_eq!(view.count(), stream.count());

        let expected: Vec<Vec<usize>> = (0..view.count())
            .map(|i| view.indexer().unrank(i).unwrap())
            .collect();
        let from_view: Vec<Vec<usize>> = view
            .iter()
            .map(|t| t.into_iter().copied().collect())
            .collect();
        let from_stream: Vec<Vec<usize>> = stream.iter().collect();
        prop_assert_eq!(&from_view, &expected);
        prop_assert_eq!(&from_stream, &expected);
    }

    /// Property: heterogeneous stream and view agree for random sizes.
    #[test]
    fn prop_keeps_order_product(sizes in prop::collection::vec(1usize..5, 1..5)) {
        let owned: Vec<Vec<usize>> = sizes.iter().map(|&s| (0..s).collect()).collect();
        let refs: Vec<&[usize]> = owned.iter().map(Vec::as_slice).collect();
        let view = join_all(&refs).unwrap();
        let stream = TupleStream::product(sizes.iter().map(|&s| 0..s).collect()).unwrap();
        let from_view: Vec<Vec<usize>> = view
            .iter()
            .map(|t| t.into_iter().copied().collect())
            .collect();
        let from_stream: Vec<Vec<usize>> = stream.iter().collect();
        prop_assert_eq!(from_view, from_stream);
    }
}
