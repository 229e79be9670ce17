//! Walks through the factory API with both eviction policies.
//!
//! Run with: cargo run --example basic_factory
//! Set `RUST_LOG=evictkit=debug` to see build and eviction events.

use evictkit::builder::{CacheFactory, PolicyKind};
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evictkit=info".into()),
        )
        .with_target(true)
        .init();

    let factory = CacheFactory::new(3);
    info!(capacity = factory.capacity(), "factory ready");

    println!("=== CacheFactory Examples ===\n");

    // Example 1: LRU Cache
    println!("1. LRU Cache");
    let mut lru = match factory.get_cache::<u64, String>(PolicyKind::Lru) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("failed to build cache: {err}");
            return;
        },
    };

    lru.put(1, "one".to_string());
    lru.put(2, "two".to_string());
    lru.put(3, "three".to_string());

    // Access key 1 to make it most recently used
    let _ = lru.get(&1);

    // Insert key 4, evicts LRU (key 2)
    lru.put(4, "four".to_string());

    println!("   contains 1? {} (was accessed)", lru.contains(&1));
    println!("   contains 2? {} (evicted as LRU)", lru.contains(&2));
    println!("   contains 4? {} (just inserted)", lru.contains(&4));
    println!();

    // Example 2: FIFO Cache, selected by name
    println!("2. FIFO Cache");
    let mut fifo = match factory.get_cache_by_name::<u64, String>("fifo") {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("failed to build cache: {err}");
            return;
        },
    };

    fifo.put(1, "one".to_string());
    fifo.put(2, "two".to_string());
    fifo.put(3, "three".to_string());

    // Access doesn't affect FIFO order
    let _ = fifo.get(&1);

    // Insert key 4, evicts oldest (key 1)
    fifo.put(4, "four".to_string());

    println!("   contains 1? {} (evicted as oldest)", fifo.contains(&1));
    println!("   contains 2? {} (still present)", fifo.contains(&2));
    println!();

    // Example 3: Misses and overwrites
    println!("3. Misses and Overwrites");
    match lru.get(&99) {
        Ok(value) => println!("   get(&99): {value}"),
        Err(err) => println!("   get(&99): {err}"),
    }
    let old = lru.put(1, "uno".to_string());
    println!("   put returned previous: {old:?}");
    println!(
        "   len: {}, capacity: {}, policy: {}",
        lru.len(),
        lru.capacity(),
        lru.policy_kind()
    );
    let order: Vec<_> = lru.keys_in_eviction_order().collect();
    println!("   eviction order: {order:?}");
    println!();

    // Example 4: Rejected configuration
    println!("4. Rejected Configuration");
    if let Err(err) = CacheFactory::new(0).get_cache::<u64, String>(PolicyKind::Lru) {
        println!("   capacity 0: {err}");
    }
    if let Err(err) = factory.get_cache_by_name::<u64, String>("lfu") {
        println!("   policy lfu: {err}");
    }

    let metrics = lru.metrics();
    info!(
        hits = metrics.hits,
        misses = metrics.misses,
        evictions = metrics.evictions,
        "lru cache done"
    );
}

// Expected output:
// === CacheFactory Examples ===
//
// 1. LRU Cache
//    contains 1? true (was accessed)
//    contains 2? false (evicted as LRU)
//    contains 4? true (just inserted)
//
// 2. FIFO Cache
//    contains 1? false (evicted as oldest)
//    contains 2? true (still present)
//
// 3. Misses and Overwrites
//    get(&99): key not found
//    put returned previous: Some("one")
//    len: 3, capacity: 3, policy: lru
//    eviction order: [3, 4, 1]
//
// 4. Rejected Configuration
//    capacity 0: invalid cache configuration: capacity must be > 0
//    policy lfu: invalid cache configuration: unknown eviction policy `lfu` (expected `lru` or `fifo`)
