use chrono::{TimeZone, Utc};
use easy_parallel::Parallel;
use rand_core::OsRng;

use crate::{
    aggregate, aggregate_and_verify, combine_additive_shares,
    compat::GroupBackend,
    constants::WIDE_SCALAR_LEN,
    crypto::hash,
    generate_keys_at, generate_threshold_shares, generate_threshold_shares_for,
    recover_secret_key, recover_signature, sign, sign_share, split_key, verify, KeyError,
    KeyPair, PartyId, SecretKey,
};

const PRIMARY_KEY: &str = "5e1fc9c03d53a8b9a63030acc2864f0c33dffddb3c276bf2b3c8d739269cc018";

fn primary<B: GroupBackend>() -> KeyPair {
    let secret = SecretKey::<B>::from_hex(PRIMARY_KEY).unwrap();
    KeyPair::from_secret_key(&secret)
}

fn run_split_sign_aggregate<B: GroupBackend>() {
    let primary = primary::<B>();
    let digest = hash("TEST");

    let shares = split_key::<B>(&primary, 2, &mut OsRng).unwrap();
    let partials: Vec<_> = shares
        .iter()
        .map(|s| sign::<B>(&s.private_key, &digest).unwrap())
        .collect();
    let combined = aggregate::<B>(&partials).unwrap();

    let expected = sign::<B>(&primary.private_key, &digest).unwrap();
    assert_eq!(combined, expected);
    assert!(verify::<B>(&combined, &primary.public_key, &digest).unwrap());
    assert_eq!(
        aggregate_and_verify::<B>(&partials, &primary.public_key, &digest).unwrap(),
        expected
    );
}

fn run_tamper_rejection<B: GroupBackend>() {
    let primary = primary::<B>();
    let digest = hash("TEST");
    let signature = sign::<B>(&primary.private_key, &digest).unwrap();

    let mut bytes = hex::decode(&digest).unwrap();
    for i in [0, bytes.len() / 2, bytes.len() - 1] {
        bytes[i] ^= 0x01;
        assert!(!verify::<B>(&signature, &primary.public_key, &hex::encode(&bytes)).unwrap());
        bytes[i] ^= 0x01;
    }
    assert!(verify::<B>(&signature, &primary.public_key, &hex::encode(&bytes)).unwrap());
}

fn run_threshold<B: GroupBackend>() {
    let primary = primary::<B>();
    let digest = hash("threshold");
    let expected = sign::<B>(&primary.private_key, &digest).unwrap();

    for (t, n) in [(2, 3), (3, 5), (4, 4)] {
        let shares = generate_threshold_shares_for::<B>(&primary, t, n, &mut OsRng).unwrap();

        // Every window of t consecutive shares recovers the key.
        for window in shares.windows(t) {
            assert_eq!(recover_secret_key::<B>(window, t).unwrap(), primary);
        }
        assert_ne!(recover_secret_key::<B>(&shares, t - 1).unwrap(), primary);

        let partials: Vec<_> = shares
            .iter()
            .rev()
            .map(|s| sign_share::<B>(s, &digest).unwrap())
            .collect();
        assert_eq!(recover_signature::<B>(&partials, t).unwrap(), expected);
    }
}

fn run_invalid_inputs<B: GroupBackend>() {
    let primary = primary::<B>();
    for n in [0, 1] {
        assert!(matches!(
            split_key::<B>(&primary, n, &mut OsRng),
            Err(KeyError::InvalidSplitParameter(_))
        ));
    }
    let ids: Vec<_> = (1..=3).map(|x| PartyId::<B>::from_u64(x).unwrap()).collect();
    assert!(matches!(
        generate_threshold_shares::<B>(&primary, 5, &ids, &mut OsRng),
        Err(KeyError::InvalidThresholdParameter(_))
    ));
}

fn run_determinism<B: GroupBackend>() {
    let seed: Vec<u8> = (0..WIDE_SCALAR_LEN as u8).collect();
    let at = Utc.with_ymd_and_hms(2022, 2, 22, 22, 22, 22).unwrap();
    let wallet = generate_keys_at::<B>(&seed, at).unwrap();
    assert_eq!(wallet, generate_keys_at::<B>(&seed, at).unwrap());

    // A split wallet's shares still add up to the seed's key.
    let shares = split_key::<B>(&wallet.keys()[0], 5, &mut OsRng).unwrap();
    assert_eq!(combine_additive_shares::<B>(&shares).unwrap(), wallet.keys()[0]);
}

fn run_concurrent_generation<B: GroupBackend>() {
    let at = Utc.with_ymd_and_hms(2022, 2, 22, 22, 22, 22).unwrap();
    let seeds: Vec<[u8; WIDE_SCALAR_LEN]> = (0..8u8).map(|i| [i + 1; WIDE_SCALAR_LEN]).collect();

    let sequential: Vec<_> = seeds
        .iter()
        .map(|seed| generate_keys_at::<B>(seed, at).unwrap())
        .collect();
    let parallel = Parallel::new()
        .each(seeds.iter(), |seed| generate_keys_at::<B>(seed, at).unwrap())
        .run();
    assert_eq!(parallel, sequential);
}

fn run_all<B: GroupBackend>() {
    run_split_sign_aggregate::<B>();
    run_tamper_rejection::<B>();
    run_threshold::<B>();
    run_invalid_inputs::<B>();
    run_determinism::<B>();
    run_concurrent_generation::<B>();
}

#[cfg(feature = "blst")]
#[test]
fn test_e2e_blst() {
    run_all::<crate::Blst>();
}

#[cfg(feature = "portable")]
#[test]
fn test_e2e_portable() {
    run_all::<crate::Bls12381>();
}

#[cfg(all(feature = "blst", feature = "portable"))]
#[test]
fn test_backends_agree_on_keys() {
    use crate::{Bls12381, Blst};

    let at = Utc.with_ymd_and_hms(2022, 2, 22, 22, 22, 22).unwrap();
    let seed = [0x5au8; WIDE_SCALAR_LEN];
    let native = generate_keys_at::<Blst>(&seed, at).unwrap();
    let portable = generate_keys_at::<Bls12381>(&seed, at).unwrap();
    assert_eq!(native, portable);

    assert_eq!(primary::<Blst>(), primary::<Bls12381>());
    // Keys from one backend are accepted by the other.
    let pair = &native.keys()[0];
    assert_eq!(
        KeyPair::from_secret_key(&pair.secret_key::<Bls12381>().unwrap()),
        *pair
    );
}

#[cfg(all(feature = "blst", feature = "portable"))]
#[test]
fn test_backends_agree_on_signatures() {
    use crate::{Bls12381, Blst};

    let pair = primary::<Blst>();
    let digest = hash("TEST");
    let native = sign::<Blst>(PRIMARY_KEY, &digest).unwrap();
    let portable = sign::<Bls12381>(PRIMARY_KEY, &digest).unwrap();
    assert_eq!(native, portable);
    assert!(native.starts_with("844c0103"));
    assert!(native.ends_with("866e"));

    assert!(verify::<Bls12381>(&native, &pair.public_key, &digest).unwrap());
    assert!(verify::<Blst>(&portable, &pair.public_key, &digest).unwrap());
}
