//! tests/chunking_tests.rs
//! Chunking invariance: feeding the same bytes in different partitions
//! must produce identical output, both in length and in content.

mod common;

use blockflow::{decrypt, encrypt, BlockflowError, Cryptor, Direction, Mode, Padding};
use common::{iv_from_hex, test_key, CBC_IV_HEX, CTR_IV_HEX};

/// The canonical partitions of a 33-byte input against block size 16.
fn partitions_of_33() -> Vec<Vec<usize>> {
    vec![vec![33], vec![16, 17], vec![1; 33], vec![32, 1]]
}

fn streamed(
    mode: Mode,
    padding: Padding,
    direction: Direction,
    input: &[u8],
    partition: &[usize],
) -> Result<Vec<u8>, BlockflowError> {
    let iv = match mode {
        Mode::Ecb => None,
        Mode::Cbc => Some(iv_from_hex(CBC_IV_HEX)),
        Mode::Ctr => Some(iv_from_hex(CTR_IV_HEX)),
    };
    let mut cryptor = Cryptor::new(&test_key(), iv.as_ref(), mode, padding, direction)?;
    let mut out = Vec::new();
    let mut offset = 0;
    for &size in partition {
        let chunk = &input[offset..offset + size];
        let mut buf = vec![0u8; cryptor.predicted_len(size, false)?];
        let n = cryptor.update(chunk, &mut buf)?;
        assert_eq!(n, buf.len(), "update wrote less than predicted");
        out.extend_from_slice(&buf);
        offset += size;
    }
    assert_eq!(offset, input.len(), "partition does not cover input");
    let mut tail = vec![0u8; cryptor.predicted_len(0, true)?];
    let m = cryptor.finalize(&mut tail)?;
    out.extend_from_slice(&tail[..m]);
    Ok(out)
}

#[test]
fn no_padding_33_bytes_emits_32_then_alignment_error() {
    let input: Vec<u8> = (0u8..33).collect();
    for partition in partitions_of_33() {
        for mode in [Mode::Ecb, Mode::Cbc] {
            let err = streamed(mode, Padding::None, Direction::Encrypt, &input, &partition)
                .unwrap_err();
            assert!(
                matches!(err, BlockflowError::Alignment(_)),
                "{mode:?} partition {partition:?}"
            );
        }
    }
}

#[test]
fn pkcs7_33_bytes_yields_48_for_every_partition() {
    let input: Vec<u8> = (0u8..33).collect();
    let reference = encrypt(
        &test_key(),
        Some(&iv_from_hex(CBC_IV_HEX)),
        Mode::Cbc,
        Padding::Pkcs7,
        &input,
    )
    .unwrap();
    assert_eq!(reference.len(), 48);

    for partition in partitions_of_33() {
        let out = streamed(
            Mode::Cbc,
            Padding::Pkcs7,
            Direction::Encrypt,
            &input,
            &partition,
        )
        .unwrap();
        assert_eq!(out, reference, "partition {partition:?}");
    }
}

#[test]
fn ctr_is_invariant_under_chunking() {
    let input: Vec<u8> = (0u8..33).collect();
    let reference = encrypt(
        &test_key(),
        Some(&iv_from_hex(CTR_IV_HEX)),
        Mode::Ctr,
        Padding::None,
        &input,
    )
    .unwrap();
    assert_eq!(reference.len(), 33);

    for partition in partitions_of_33() {
        let out = streamed(Mode::Ctr, Padding::None, Direction::Encrypt, &input, &partition)
            .unwrap();
        assert_eq!(out, reference, "partition {partition:?}");
    }
}

#[test]
fn decrypt_chunking_matches_one_shot() {
    let plaintext = b"The streaming decryptor must hold back the pad block!"; // 53 bytes
    let key = test_key();
    let iv = iv_from_hex(CBC_IV_HEX);
    let ciphertext = encrypt(&key, Some(&iv), Mode::Cbc, Padding::Pkcs7, plaintext).unwrap();
    assert_eq!(ciphertext.len(), 64);

    // Adversarial ciphertext partitions, including one that strands the
    // final (padding) block alone and one that splits it.
    let partitions: Vec<Vec<usize>> = vec![
        vec![64],
        vec![48, 16],
        vec![16, 16, 16, 16],
        vec![63, 1],
        vec![1; 64],
        vec![31, 33],
    ];
    for partition in partitions {
        let out = streamed(
            Mode::Cbc,
            Padding::Pkcs7,
            Direction::Decrypt,
            &ciphertext,
            &partition,
        )
        .unwrap();
        assert_eq!(out, plaintext, "partition {partition:?}");
    }
}

#[test]
fn empty_updates_change_nothing() {
    let key = test_key();
    let iv = iv_from_hex(CBC_IV_HEX);
    let mut cryptor = Cryptor::new(
        &key,
        Some(&iv),
        Mode::Cbc,
        Padding::Pkcs7,
        Direction::Encrypt,
    )
    .unwrap();

    let mut out = vec![0u8; 64];
    assert_eq!(cryptor.update(b"", &mut out).unwrap(), 0);
    let n = cryptor.update(b"17 bytes of text!", &mut out).unwrap();
    assert_eq!(n, 16);
    assert_eq!(cryptor.update(b"", &mut []).unwrap(), 0);
    let m = cryptor.finalize(&mut out[n..]).unwrap();

    let reference = encrypt(
        &key,
        Some(&iv_from_hex(CBC_IV_HEX)),
        Mode::Cbc,
        Padding::Pkcs7,
        b"17 bytes of text!",
    )
    .unwrap();
    assert_eq!(&out[..n + m], &reference[..]);
}

#[test]
fn roundtrip_all_modes() {
    let key = test_key();
    let cases = [
        (Mode::Ecb, Padding::Pkcs7, None),
        (Mode::Cbc, Padding::Pkcs7, Some(CBC_IV_HEX)),
        (Mode::Ctr, Padding::None, Some(CTR_IV_HEX)),
    ];
    let messages: &[&[u8]] = &[b"", b"x", b"exactly sixteen!", &[0xAB; 100]];
    for &(mode, padding, iv_hex) in &cases {
        for &msg in messages {
            let iv = iv_hex.map(iv_from_hex);
            let ct = encrypt(&key, iv.as_ref(), mode, padding, msg).unwrap();
            let pt = decrypt(&key, iv.as_ref(), mode, padding, &ct).unwrap();
            assert_eq!(pt, msg, "{mode:?} len {}", msg.len());
        }
    }
}
