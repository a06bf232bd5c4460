use super::*;

#[test]
fn fnv_matches_reference_vectors() {
    let mut h = Fnv1a64::default();
    assert_eq!(h.finish(), 0xcbf2_9ce4_8422_2325);
    h.write(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn fnv_is_incremental() {
    let mut a = Fnv1a64::default();
    a.write(b"dimscene");
    let mut b = Fnv1a64::with_seed(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b'd');
    b.write(b"imscene");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn signed_zero_hashes_identically() {
    let mut a = Fnv1a64::default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::default();
    b.write_f64(-0.0);
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(255, 0), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
}
