//! Size/capacity and content-preservation invariants under random operation
//! sequences.

use basis_alloc::Allocator;
use basis_array::{DynArray, ResizePolicy};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Reserve(usize),
    Resize(usize),
    Shrink,
    Write(prop::sample::Index, u32),
    Push(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0_usize..16).prop_map(Op::Reserve),
        (0_usize..32).prop_map(Op::Resize),
        Just(Op::Shrink),
        (any::<prop::sample::Index>(), any::<u32>()).prop_map(|(i, v)| Op::Write(i, v)),
        any::<u32>().prop_map(Op::Push),
    ]
}

fn policy() -> impl Strategy<Value = ResizePolicy> {
    prop_oneof![Just(ResizePolicy::Reuse), Just(ResizePolicy::Exact)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn contents_survive_reallocation(
        policy in policy(),
        initial in 0_usize..8,
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut array = DynArray::make_in(Allocator::stdlib(), 4, initial)
            .unwrap()
            .with_policy(policy);
        let mut model = vec![0_u32; initial];

        for op in ops {
            match op {
                Op::Reserve(extra) => array.reserve(extra).unwrap(),
                Op::Resize(n) => {
                    array.resize(n).unwrap();
                    model.resize(n, 0);
                }
                Op::Shrink => {
                    array.shrink().unwrap();
                    prop_assert_eq!(array.capacity(), array.size());
                }
                Op::Write(i, v) => {
                    if !model.is_empty() {
                        let i = i.index(model.len());
                        array.set_scalar(i, v).unwrap();
                        model[i] = v;
                    }
                }
                Op::Push(v) => {
                    array.push_scalar(v).unwrap();
                    model.push(v);
                }
            }

            prop_assert!(array.size() <= array.capacity());
            prop_assert_eq!(array.size(), model.len());
            let contents: Vec<u32> = (0..array.size())
                .map(|i| array.get_scalar(i).unwrap())
                .collect();
            prop_assert_eq!(&contents, &model);
        }
    }
}
