use recencache::prelude::*;

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    if let Some((key, value)) = cache.push(3, "gamma".to_string()) {
        println!("evicted {}: {}", key, value);
    }

    match cache.try_get(&2) {
        Ok(value) => println!("hit 2: {}", value),
        Err(e) => println!("get 2: {}", e),
    }

    let order: Vec<_> = cache.keys().collect();
    println!("mru -> lru: {:?}", order);
}

// Expected output:
// hit 1: alpha
// evicted 2: beta
// get 2: key not found in cache
// mru -> lru: [3, 1]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 3 evicts key 2.
