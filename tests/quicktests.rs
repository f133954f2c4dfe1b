use std::collections::{BTreeSet, HashSet};

use parent_bst::Tree;

fn shape(tree: &Tree<i8>) -> Vec<(i8, Option<i8>, Option<i8>, Option<i8>)> {
    let mut shape = Vec::new();
    let mut stack: Vec<_> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        shape.push((
            *node.element(),
            node.left().map(|n| *n.element()),
            node.right().map(|n| *n.element()),
            node.parent().map(|n| *n.element()),
        ));
        stack.extend(node.left());
        stack.extend(node.right());
    }
    shape
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.search(x).map(|n| n.element()) == Some(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.search(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn count_is_distinct_inserts(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let distinct: HashSet<_> = xs.into_iter().collect();

        tree.count() == distinct.len()
    }
}

quickcheck::quickcheck! {
    fn duplicate_insert_keeps_shape(xs: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let before = shape(&tree);

        xs.iter().all(|x| !tree.insert(*x)) && shape(&tree) == before
    }
}

quickcheck::quickcheck! {
    fn delete_missing_keeps_shape(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != missing).collect();
        let before = shape(&tree);

        tree.delete(&missing).is_none() && shape(&tree) == before
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            tree.delete(delete);
        }

        let mut still_present: BTreeSet<_> = xs.into_iter().collect();
        for delete in &deletes {
            still_present.remove(delete);
        }

        deletes.iter().all(|x| tree.search(x).is_none())
            && tree.iter().eq(still_present.iter())
            && tree.count() == still_present.len()
            && tree.verify().is_ok()
    }
}

quickcheck::quickcheck! {
    fn every_child_points_back(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.into_iter().collect();
        for delete in &deletes {
            tree.delete(delete);
        }

        shape(&tree).into_iter().all(|(element, left, right, _)| {
            let parent_of = |child: Option<i8>| {
                child.map_or(true, |child| {
                    tree.search(&child)
                        .and_then(|n| n.parent())
                        .map(|n| *n.element())
                        == Some(element)
                })
            };
            parent_of(left) && parent_of(right)
        }) && tree.root().map_or(true, |root| root.parent().is_none())
    }
}
