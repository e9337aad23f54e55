use crate::set::OrderedSet;
use rand::seq::IteratorRandom;
use rand::{thread_rng, Rng};
use test::Bencher;

fn even_set(len: i32) -> OrderedSet<i32> {
    (0..len).map(|n| n * 2).collect()
}

#[bench]
fn setup_random_ordered_set(b: &mut Bencher) {
    let mut rng = thread_rng();
    let mut set = OrderedSet::new();

    b.iter(|| {
        set.insert(rng.gen::<usize>());
    });
}

#[bench]
fn take_random_ordered_set(b: &mut Bencher) {
    let mut rng = thread_rng();
    let mut xs = (-10000..10000).choose_multiple(&mut rng, 1000);

    let mut set = xs.iter().cloned().collect::<OrderedSet<_>>();

    b.iter(|| {
        if let Some(x) = xs.pop() {
            set.take(&x);
        }
    });
}

#[bench]
fn find_random_ordered_set(b: &mut Bencher) {
    let mut rng = thread_rng();
    let set = even_set(10000);

    b.iter(|| set.find(&rng.gen_range(0, 20000)).is_end());
}

#[bench]
fn lower_bound_random_ordered_set(b: &mut Bencher) {
    let mut rng = thread_rng();
    let set = even_set(10000);

    b.iter(|| set.lower_bound(&rng.gen_range(0, 20000)).get().cloned());
}

#[bench]
fn cursor_walk_forward(b: &mut Bencher) {
    let set = even_set(10000);

    b.iter(|| {
        let mut cursor = set.begin();
        let mut steps = 0;

        while !cursor.is_end() {
            cursor.move_next();
            steps += 1;
        }

        steps
    });
}

#[bench]
fn cursor_walk_backward(b: &mut Bencher) {
    let set = even_set(10000);

    b.iter(|| {
        let mut cursor = set.end();
        let mut steps = 0;

        while cursor != set.begin() {
            cursor.move_prev();
            steps += 1;
        }

        steps
    });
}
