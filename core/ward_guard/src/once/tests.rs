use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::*;

#[test]
fn first_call_wins() {
    let flag = OnceFlag::new();
    assert!(!flag.is_set());
    assert!(flag.first());
    assert!(flag.is_set());
    assert!(!flag.first());
    assert!(!flag.first());
}

#[test]
fn static_flag_starts_unset() {
    static FLAG: OnceFlag = OnceFlag::new();
    assert!(FLAG.first());
    assert!(!FLAG.first());
}

#[test]
fn exactly_one_winner_across_threads() {
    let flag = Arc::new(OnceFlag::new());
    let winners = Arc::new(AtomicUsize::new(0));

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let flag = Arc::clone(&flag);
            let winners = Arc::clone(&winners);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    if flag.first() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();
    for thread in threads {
        assert!(thread.join().is_ok());
    }

    assert_eq!(winners.load(Ordering::SeqCst), 1);
}
