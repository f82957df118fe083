use aka_vector::{
    assemble, derive_opc, f3, f4, f5, handle_request, verify_autn, Aes128Ecb, AuthRequest,
    AvAssembler, Error, KeyMaterial,
};
use proptest::prelude::*;

const ZERO: &str = "00000000000000000000000000000000";

fn zero_keys() -> KeyMaterial {
    KeyMaterial::from_hex(ZERO, ZERO).unwrap()
}

#[test]
fn short_keys_rejected() {
    let err = KeyMaterial::from_hex("abcdef", "012345").unwrap_err();
    assert!(matches!(err, Error::InvalidKeyLength { .. }));
}

#[test]
fn request_without_credentials_rejected() {
    let mut assembler = AvAssembler::new();
    let err = handle_request(&mut assembler, &AuthRequest::default()).unwrap_err();
    assert!(matches!(err, Error::MissingParameter(_)));
}

#[test]
fn key_material_shared_across_threads() {
    let keys = std::sync::Arc::new(zero_keys());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let keys = keys.clone();
            std::thread::spawn(move || assemble(&keys, &[0u8; 6], &[0u8; 16]).unwrap())
        })
        .collect();

    let expected = assemble(&keys, &[0u8; 6], &[0u8; 16]).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_opc_deterministic(
        k in prop::array::uniform16(any::<u8>()),
        op in prop::array::uniform16(any::<u8>()),
    ) {
        let a = KeyMaterial::new(k, op, &Aes128Ecb).unwrap();
        let b = KeyMaterial::new(k, op, &Aes128Ecb).unwrap();
        prop_assert_eq!(a.opc(), b.opc());
        prop_assert_eq!(*a.opc(), derive_opc(&Aes128Ecb, &k, &op).unwrap());
    }

    #[test]
    fn prop_generation_deterministic(
        k in prop::array::uniform16(any::<u8>()),
        op in prop::array::uniform16(any::<u8>()),
        sqn in prop::array::uniform6(any::<u8>()),
        rand in prop::array::uniform16(any::<u8>()),
    ) {
        let keys = KeyMaterial::new(k, op, &Aes128Ecb).unwrap();
        let mut assembler = AvAssembler::new();
        let sqn_hex = hex::encode(sqn);
        let rand_hex = hex::encode(rand);

        let first = assembler.generate(&keys, Some(&sqn_hex), Some(&rand_hex)).unwrap();
        let second = assembler.generate(&keys, Some(&sqn_hex), Some(&rand_hex)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_hex_lengths(
        k in prop::array::uniform16(any::<u8>()),
        op in prop::array::uniform16(any::<u8>()),
        sqn in prop::array::uniform6(any::<u8>()),
    ) {
        let keys = KeyMaterial::new(k, op, &Aes128Ecb).unwrap();
        let av = AvAssembler::new().generate(&keys, Some(&hex::encode(sqn)), None).unwrap();
        prop_assert_eq!(av.rand().len(), 32);
        prop_assert_eq!(av.xres().len(), 16);
        prop_assert_eq!(av.autn().len(), 32);
        prop_assert_eq!(av.ck().len(), 32);
        prop_assert_eq!(av.ik().len(), 32);
        prop_assert!(av.autn().chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn prop_sqn_recovered_from_autn(
        opc in prop::array::uniform16(any::<u8>()),
        sqn in prop::array::uniform6(any::<u8>()),
        rand in prop::array::uniform16(any::<u8>()),
    ) {
        let keys = KeyMaterial::with_opc([0u8; 16], opc);
        let q = assemble(&keys, &sqn, &rand).unwrap();

        let ak = f5(&opc, &rand).unwrap();
        let concealed = q.autn.sqn_xor_ak();
        let mut recovered = [0u8; 6];
        for i in 0..6 {
            recovered[i] = concealed[i] ^ ak[i];
        }
        prop_assert_eq!(recovered, sqn);
        prop_assert_eq!(verify_autn(&keys, &rand, &q.autn).unwrap(), sqn);
    }

    #[test]
    fn prop_domain_separation(
        opc in prop::array::uniform16(any::<u8>()),
        rand in prop::array::uniform16(any::<u8>()),
    ) {
        let ck = f3(&opc, &rand).unwrap();
        let ik = f4(&opc, &rand).unwrap();
        let ak = f5(&opc, &rand).unwrap();
        prop_assert_ne!(ck, ik);
        prop_assert_ne!(&ck[..6], &ak[..]);
        prop_assert_ne!(&ik[..6], &ak[..]);
    }

    #[test]
    fn prop_rand_change_alters_every_output(
        rand in prop::array::uniform16(any::<u8>())
            .prop_filter("differs from zero RAND", |r| r.iter().any(|&b| b != 0)),
    ) {
        let keys = zero_keys();
        let base = assemble(&keys, &[0u8; 6], &[0u8; 16]).unwrap();
        let other = assemble(&keys, &[0u8; 6], &rand).unwrap();

        prop_assert_ne!(base.xres, other.xres);
        prop_assert_ne!(base.ck, other.ck);
        prop_assert_ne!(base.ik, other.ik);
        prop_assert_ne!(base.autn, other.autn);
        prop_assert_ne!(
            f5(keys.opc(), &[0u8; 16]).unwrap(),
            f5(keys.opc(), &rand).unwrap()
        );
    }

    #[test]
    fn prop_single_bit_rand_flip(bit in 0usize..128) {
        let keys = zero_keys();
        let mut rand = [0u8; 16];
        rand[bit / 8] ^= 1 << (bit % 8);

        let base = assemble(&keys, &[0u8; 6], &[0u8; 16]).unwrap();
        let flipped = assemble(&keys, &[0u8; 6], &rand).unwrap();
        prop_assert_ne!(base.xres, flipped.xres);
        prop_assert_ne!(base.autn, flipped.autn);
        prop_assert_ne!(base.ck, flipped.ck);
        prop_assert_ne!(base.ik, flipped.ik);
    }

    #[test]
    fn prop_wrong_sqn_length_rejected(len in (1usize..12).prop_filter("not six", |l| *l != 6)) {
        let keys = zero_keys();
        let sqn = "00".repeat(len);
        let err = AvAssembler::new().generate(&keys, Some(&sqn), Some(ZERO)).unwrap_err();
        prop_assert_eq!(err, Error::InvalidInputLength { field: "sqn", expected: 6, len });
    }
}
