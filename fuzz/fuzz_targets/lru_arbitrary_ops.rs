#![no_main]

use libfuzzer_sys::fuzz_target;
use recencache::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache.
//
// First byte picks the capacity; each following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 8;
        let key = pair[1] % 64;

        match op {
            0 | 1 => {
                let value = u32::from(pair[0]) << 8 | u32::from(key);
                let was_present = cache.contains(&key);
                let old_len = cache.len();
                cache.put(key, value);

                assert_eq!(cache.peek(&key), Some(&value));
                assert_eq!(cache.peek_mru().map(|(k, _)| *k), Some(key));
                if was_present || old_len < capacity {
                    assert_eq!(cache.len(), old_len + usize::from(!was_present));
                } else {
                    assert_eq!(cache.len(), capacity);
                }
            }
            2 => {
                // get promotes on hit
                if cache.get(&key).is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            3 => {
                let expected = cache.peek(&key).copied();
                assert_eq!(cache.remove(&key), expected);
                assert!(!cache.contains(&key));
            }
            4 => {
                let lru = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), lru);
            }
            5 => {
                let present = cache.contains(&key);
                assert_eq!(cache.touch(&key), present);
            }
            6 => {
                let value = *cache.get_or_insert_with(key, || u32::from(key));
                assert_eq!(cache.peek(&key), Some(&value));
            }
            7 => {
                assert_eq!(cache.iter().count(), cache.len());
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
