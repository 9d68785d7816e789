use bytepat::ByteSet;

#[test]
fn test_empty_and_full() {
    assert!(ByteSet::new().is_empty());
    assert_eq!(ByteSet::new().len(), 0);
    assert!(ByteSet::full().is_full());
    assert_eq!(ByteSet::full().len(), 256);
    assert_eq!(ByteSet::new().inverted(), ByteSet::full());
}

#[test]
fn test_ranges() {
    let mut set = ByteSet::new();
    set.add_range(0x7a, 0x61);
    set.add_byte(0x00);
    set.add_byte(0xff);
    set.add_range(0x30, 0x39);
    assert_eq!(set.len(), 26 + 10 + 2);
    assert_eq!(
        set.ranges(),
        vec![(0x00, 0x00), (0x30, 0x39), (0x61, 0x7a), (0xff, 0xff)]
    );
    assert_eq!(format!("{set:?}"), "[00 30-39 61-7a ff]");
    assert_eq!(ByteSet::full().ranges(), vec![(0x00, 0xff)]);
}

#[test]
fn test_union_and_invert() {
    let mut evens: ByteSet = (0..=u8::MAX).filter(|b| b % 2 == 0).collect();
    let odds = evens.inverted();
    assert_eq!(odds.len(), 128);
    assert!(odds.iter().all(|b| b % 2 == 1));
    evens.union_with(&odds);
    assert!(evens.is_full());

    let mut set = ByteSet::single(0x41);
    set.invert();
    set.invert();
    assert_eq!(set, ByteSet::single(0x41));
}
