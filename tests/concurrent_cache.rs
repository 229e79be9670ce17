// ==============================================
// CONCURRENT CACHE TESTS (integration)
// ==============================================
#![cfg(feature = "concurrency")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use evictkit::builder::{CacheFactory, PolicyKind};
use evictkit::cache::ConcurrentCache;
use evictkit::error::CacheError;

fn shared(capacity: usize, policy: PolicyKind) -> ConcurrentCache<String, usize> {
    ConcurrentCache::new(CacheFactory::new(capacity).get_cache(policy).unwrap())
}

#[test]
fn parallel_writers_respect_capacity() {
    for policy in [PolicyKind::Lru, PolicyKind::Fifo] {
        let cache = shared(64, policy);
        let num_threads = 8;
        let ops_per_thread = 500;

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        cache.put(format!("t{thread_id}_{i}"), i);
                        assert!(cache.len() <= 64);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 64);
        cache.with_cache(|inner| inner.check_invariants().unwrap());
        assert_eq!(
            cache.metrics().evictions,
            (num_threads * ops_per_thread - 64) as u64
        );
    }
}

#[test]
fn mixed_readers_and_writers_stay_consistent() {
    let cache = shared(32, PolicyKind::Lru);
    for i in 0..32 {
        cache.put(format!("seed_{i}"), i);
    }
    let hits = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..6)
        .map(|thread_id| {
            let cache = cache.clone();
            let hits = hits.clone();
            thread::spawn(move || {
                for i in 0..300 {
                    match i % 3 {
                        0 => {
                            cache.put(format!("t{thread_id}_{i}"), i);
                        },
                        1 => {
                            if cache.get(&format!("seed_{}", i % 32)).is_ok() {
                                hits.fetch_add(1, Ordering::Relaxed);
                            }
                        },
                        _ => match cache.remove(&format!("t{thread_id}_{}", i - 2)) {
                            Ok(_) | Err(CacheError::KeyNotFound) => {},
                            Err(err) => panic!("unexpected error: {err}"),
                        },
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= cache.capacity());
    cache.with_cache(|inner| inner.check_invariants().unwrap());
    assert_eq!(cache.metrics().hits, hits.load(Ordering::Relaxed) as u64);
}

#[test]
fn clones_share_state() {
    let cache = shared(4, PolicyKind::Fifo);
    let other = cache.clone();
    cache.put("a".to_string(), 1);
    assert_eq!(other.get(&"a".to_string()), Ok(1));
    other.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.policy_kind(), PolicyKind::Fifo);
}
