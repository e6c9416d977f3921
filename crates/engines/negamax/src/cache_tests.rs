use super::*;
use chess_core::PieceKind;

fn key(position: u64, from: u8, to: u8, depth: u8) -> CacheKey {
    CacheKey::new(position, Move::new(from, to, PieceKind::Knight), depth)
}

#[test]
fn test_lookup_counts_hits_and_misses() {
    let mut cache = PositionCache::with_capacity(16);
    assert_eq!(cache.lookup(&key(1, 6, 21, 2)), None);
    cache.store(key(1, 6, 21, 2), 35);
    assert_eq!(cache.lookup(&key(1, 6, 21, 2)), Some(35));
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn test_depth_and_move_are_part_of_the_key() {
    let mut cache = PositionCache::with_capacity(16);
    cache.store(key(1, 6, 21, 2), 35);
    assert_eq!(cache.lookup(&key(1, 6, 21, 1)), None);
    assert_eq!(cache.lookup(&key(1, 6, 23, 2)), None);
    assert_eq!(cache.lookup(&key(2, 6, 21, 2)), None);
}

#[test]
fn test_promotion_piece_distinguishes_moves() {
    let queen = Move::new(52, 60, PieceKind::Pawn).promoting(PieceKind::Queen);
    let knight = Move::new(52, 60, PieceKind::Pawn).promoting(PieceKind::Knight);
    assert_ne!(CacheKey::new(9, queen, 0), CacheKey::new(9, knight, 0));
}

#[test]
fn test_full_cache_flushes_before_insert() {
    let mut cache = PositionCache::with_capacity(2);
    cache.store(key(1, 0, 1, 0), 1);
    cache.store(key(2, 0, 1, 0), 2);
    // Overwriting an existing key never flushes.
    cache.store(key(2, 0, 1, 0), 3);
    assert_eq!(cache.len(), 2);

    cache.store(key(3, 0, 1, 0), 4);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.lookup(&key(3, 0, 1, 0)), Some(4));
    assert_eq!(cache.lookup(&key(1, 0, 1, 0)), None);
}

#[test]
fn test_clear_resets_entries_and_counters() {
    let mut cache = PositionCache::with_capacity(4);
    cache.store(key(1, 0, 1, 0), 1);
    cache.lookup(&key(1, 0, 1, 0));
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.hits(), 0);
    assert_eq!(cache.capacity(), 4);
}
