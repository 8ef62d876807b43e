#![no_main]

use libfuzzer_sys::fuzz_target;
use recencache::ds::{RecencyList, SlotId};

// Fuzz arbitrary operation sequences on RecencyList, including stale handles.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u8> = RecencyList::new();
    let mut ids: Vec<SlotId> = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let arg = pair[1];

        match op {
            0 => {
                let id = list.push_front(arg);
                assert_eq!(list.front_id(), Some(id));
                ids.push(id);
            }
            1 => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    let live = list.contains(id);
                    assert_eq!(list.move_to_front(id), live);
                    if live {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            }
            2 => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    let live = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), live);
                    assert!(!list.contains(id));
                }
            }
            3 => {
                let back = list.back().copied();
                assert_eq!(list.pop_back(), back);
            }
            4 => {
                assert_eq!(list.iter().count(), list.len());
            }
            _ => unreachable!(),
        }

        assert!(list.check_invariants().is_ok());
    }
});
