//! FIPS 202 known-answer vectors for every SHA-3 size.

use saturn_crypto::{hash_hex, DigestSize, Sha3};

const MSG_448: &str = "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

struct Vector {
    bits: i32,
    empty: &'static str,
    abc: &'static str,
    msg_448: &'static str,
}

const VECTORS: [Vector; 4] = [
    Vector {
        bits: 224,
        empty: "6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7",
        abc: "e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf",
        msg_448: "8a24108b154ada21c9fd5574494479ba5c7e7ab76ef264ead0fcce33",
    },
    Vector {
        bits: 256,
        empty: "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
        abc: "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
        msg_448: "41c0dba2a9d6240849100376a8235e2c82e1b9998a999e21db32dd97496d3376",
    },
    Vector {
        bits: 384,
        empty: "0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2a\
                c3713831264adb47fb6bd1e058d5f004",
        abc: "ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b2\
              98d88cea927ac7f539f1edf228376d25",
        msg_448: "991c665755eb3a4b6bbdfb75c78a492e8c56a22c5c4d7e429bfdbc32b9d4ad5a\
                  a04a1f076e62fea19eef51acd0657c22",
    },
    Vector {
        bits: 512,
        empty: "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
                15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26",
        abc: "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
              10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0",
        msg_448: "04a371e84ecfb5b8b77cb48610fca8182dd457ce6f326a0fd3d7ec2f1e91636d\
                  ee691fbe0c985302ba1b0d8dc78c086346b533b49c030d99a27daf1139d6e75e",
    },
];

/* ===== ONE-SHOT ===== */

#[test]
fn test_one_shot_vectors() {
    for v in &VECTORS {
        let expected = |hex: &str| hex.to_ascii_uppercase();
        assert_eq!(hash_hex(v.bits, b"").unwrap(), expected(v.empty), "SHA3-{} empty", v.bits);
        assert_eq!(hash_hex(v.bits, b"abc").unwrap(), expected(v.abc), "SHA3-{} abc", v.bits);
        assert_eq!(
            hash_hex(v.bits, MSG_448).unwrap(),
            expected(v.msg_448),
            "SHA3-{} 448-bit message",
            v.bits
        );
    }
}

/* ===== INCREMENTAL ===== */

#[test]
fn test_byte_at_a_time_matches_vectors() {
    for v in &VECTORS {
        let mut engine = Sha3::with_bits(v.bits).expect("supported size");
        for byte in MSG_448.as_bytes() {
            engine.update([*byte]).expect("update before finalize");
        }
        let digest = engine.finalize().expect("first finalize");
        assert_eq!(digest.to_hex(), v.msg_448.to_ascii_uppercase());
        assert_eq!(digest.len(), engine.digest_size().output_bytes());
    }
}

#[test]
fn test_reset_engine_reproduces_vectors() {
    for size in DigestSize::ALL {
        let mut engine = Sha3::new(size);
        engine.update(b"some unrelated prefix").unwrap();
        engine.finalize().unwrap();

        engine.reset();
        engine.update(b"abc").unwrap();
        let v = VECTORS.iter().find(|v| v.bits as usize == size.bits()).unwrap();
        assert_eq!(engine.finalize().unwrap().to_hex(), v.abc.to_ascii_uppercase());
    }
}

/* ===== LONG INPUT ===== */

#[test]
fn test_million_a() {
    // FIPS 202 example: 1,000,000 repetitions of 'a'.
    let data = vec![b'a'; 1_000_000];
    assert_eq!(
        hash_hex(256, &data).unwrap(),
        "5C8875AE474A3634BA4FD55EC85BFFD661F32ACA75C6D699D0CDCB6C115891C1"
    );
}
