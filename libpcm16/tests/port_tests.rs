//! Block hand-off port tests
use std::thread;
use std::time::Duration;

use libpcm16_audio::{convert_block, port, ConvertedBlock, PortStats};

#[test]
fn test_blocks_arrive_in_order() {
    let (tx, rx) = port::channel(8);
    for i in 0..5 {
        assert!(tx.post(ConvertedBlock::new(vec![i as i16; 4])));
    }
    let firsts: Vec<i16> = rx.drain().iter().map(|b| b.samples()[0]).collect();
    assert_eq!(firsts, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_full_port_drops_newest() {
    let (tx, rx) = port::channel(2);
    assert!(tx.post(ConvertedBlock::new(vec![1])));
    assert!(tx.post(ConvertedBlock::new(vec![2])));
    assert!(!tx.post(ConvertedBlock::new(vec![3])));

    assert_eq!(rx.pending(), 2);
    assert_eq!(
        tx.stats(),
        PortStats {
            posted: 2,
            dropped: 1
        }
    );
    let kept: Vec<Vec<i16>> = rx.drain().into_iter().map(Vec::from).collect();
    assert_eq!(kept, vec![vec![1], vec![2]]);
}

#[test]
fn test_zero_capacity_is_raised_to_one() {
    let (tx, rx) = port::channel(0);
    assert_eq!(tx.capacity(), 1);
    assert!(tx.post(ConvertedBlock::new(vec![0])));
    assert!(rx.try_recv().is_some());
}

#[test]
fn test_post_after_listener_dropped_counts_drop() {
    let (tx, rx) = port::channel(4);
    drop(rx);
    assert!(!tx.post(ConvertedBlock::new(vec![0; 128])));
    assert_eq!(tx.stats().dropped, 1);
}

#[test]
fn test_receiver_ends_when_sender_dropped() {
    let (tx, rx) = port::channel(4);
    tx.post(convert_block(&[0.5; 8]));
    drop(tx);
    assert_eq!(rx.iter().count(), 1);
    assert!(rx.recv().is_none());
}

#[test]
fn test_recv_timeout_on_empty_port() {
    let (_tx, rx) = port::default_channel();
    assert!(rx.recv_timeout(Duration::from_millis(10)).is_none());
}

#[test]
fn test_block_moves_across_threads_without_copy() {
    let (tx, rx) = port::channel(1);
    let block = convert_block(&[0.25; 256]);
    let address = block.samples().as_ptr() as usize;

    let sender = thread::spawn(move || {
        tx.post(block);
    });
    let received = rx.recv().expect("block");
    sender.join().unwrap();

    // same heap buffer on the other side
    assert_eq!(received.samples().as_ptr() as usize, address);
    assert_eq!(received.len(), 256);
}
