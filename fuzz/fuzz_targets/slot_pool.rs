#![no_main]

use ident::{ArchetypeId, NetId, SlotPool};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut pool = SlotPool::new();
    let mut issued: Vec<NetId> = Vec::new();

    for chunk in data.chunks(4).take(2048) {
        let op = chunk[0] % 4;
        let arg = chunk.iter().skip(1).fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
        match op {
            0 => {
                if let Ok(id) = pool.allocate(ArchetypeId::new(arg as u16)) {
                    assert!(pool.is_alive(id));
                    issued.push(id);
                }
            }
            1 if !issued.is_empty() => {
                let id = issued[arg as usize % issued.len()];
                let was_alive = pool.is_alive(id);
                assert_eq!(pool.free(id).is_ok(), was_alive);
                assert!(!pool.is_alive(id));
            }
            2 => {
                // Keep attached indices small so the pool stays bounded.
                let id = NetId::new(arg).with_index(arg & 0x3FF);
                let was_occupied = pool.slot(id.index()).is_some_and(|s| s.is_occupied());
                assert_eq!(pool.attach(id, ArchetypeId::new(0)).is_ok(), !was_occupied);
                if !was_occupied {
                    issued.push(id);
                }
            }
            _ => {
                let id = NetId::new(arg);
                let _ = pool.is_alive(id);
                let _ = pool.archetype_of(id);
            }
        }
        assert_eq!(pool.iter_alive().count(), pool.len());
    }
});
