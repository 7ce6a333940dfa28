use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use trafseg::index::{Aggregate, RangeIndex, Slot};

// Integer valued measurements keep every float sum exact.
fn random_slots(rng: &mut ChaCha12Rng, n_slots: usize) -> Vec<Slot> {
    (0..n_slots)
        .map(|_| {
            Slot::new(
                rng.random_range(0..120u32) as f64,
                rng.random_range(0..2500u32) as f64,
            )
        })
        .collect()
}

fn naive_sum(slots: &[Slot], l: usize, r: usize) -> Aggregate {
    slots[l..=r]
        .iter()
        .fold(Aggregate::NEUTRAL, |acc, &slot| acc.merge(slot.into()))
}

#[test]
fn queries_match_naive_sums() {
    let mut rng = ChaCha12Rng::seed_from_u64(1);
    for n_slots in [1, 2, 3, 5, 8, 13, 24, 31] {
        let slots = random_slots(&mut rng, n_slots);
        let index = RangeIndex::from_slots(&slots).unwrap();

        for l in 0..n_slots {
            for r in l..n_slots {
                assert_eq!(index.query(l, r).unwrap(), naive_sum(&slots, l, r));
            }
        }
        assert_eq!(index.total(), naive_sum(&slots, 0, n_slots - 1));
    }
}

#[test]
fn averages_divide_by_range_length() {
    let mut rng = ChaCha12Rng::seed_from_u64(2);
    let slots = random_slots(&mut rng, 24);
    let index = RangeIndex::from_slots(&slots).unwrap();

    for l in 0..24 {
        for r in l..24 {
            let agg = index.query(l, r).unwrap();
            let avg = index.average(l, r).unwrap();
            let len = (r - l + 1) as f64;
            assert_eq!(avg.speed, agg.speed_sum / len);
            assert_eq!(avg.congestion, agg.congestion_sum / len);
        }
    }
}

#[test]
fn random_updates_keep_queries_consistent() {
    let mut rng = ChaCha12Rng::seed_from_u64(3);
    let n_slots = 24;
    let mut slots = random_slots(&mut rng, n_slots);
    let mut index = RangeIndex::build(n_slots, &slots).unwrap();

    for _ in 0..200 {
        let i_slot = rng.random_range(0..n_slots);
        let new_slot = random_slots(&mut rng, 1)[0];

        let before: Vec<_> = (0..n_slots)
            .flat_map(|l| (l..n_slots).map(move |r| (l, r)))
            .filter(|&(l, r)| !(l..=r).contains(&i_slot))
            .map(|(l, r)| ((l, r), index.query(l, r).unwrap()))
            .collect();

        index.update(i_slot, new_slot).unwrap();
        slots[i_slot] = new_slot;

        assert_eq!(index.query(i_slot, i_slot).unwrap(), Aggregate::from(new_slot));
        assert_eq!(index.slot(i_slot).unwrap(), new_slot);
        assert_eq!(index.total(), naive_sum(&slots, 0, n_slots - 1));

        // Ranges that do not contain the updated slot are unaffected.
        for ((l, r), agg) in before {
            assert_eq!(index.query(l, r).unwrap(), agg);
        }
    }
}

#[test]
fn independent_instances() {
    let a_slots = vec![Slot::new(1.0, 1.0); 4];
    let b_slots = vec![Slot::new(2.0, 2.0); 4];
    let mut a = RangeIndex::from_slots(&a_slots).unwrap();
    let b = RangeIndex::from_slots(&b_slots).unwrap();

    a.update(0, Slot::new(9.0, 9.0)).unwrap();

    assert_eq!(a.total().speed_sum, 12.0);
    assert_eq!(b.total().speed_sum, 8.0);
}

#[test]
fn identical_input_builds_identical_index() {
    let mut rng = ChaCha12Rng::seed_from_u64(4);
    let slots: Vec<_> = (0..24)
        .map(|_| Slot::new(rng.random::<f64>() * 120.0, rng.random::<f64>() * 2500.0))
        .collect();

    let a = RangeIndex::from_slots(&slots).unwrap();
    let b = RangeIndex::from_slots(&slots).unwrap();
    for l in 0..24 {
        for r in l..24 {
            let (qa, qb) = (a.query(l, r).unwrap(), b.query(l, r).unwrap());
            assert_eq!(qa.speed_sum.to_bits(), qb.speed_sum.to_bits());
            assert_eq!(qa.congestion_sum.to_bits(), qb.congestion_sum.to_bits());
        }
    }
}
