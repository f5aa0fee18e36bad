// tests/policer/frame_tests.rs

#[cfg(test)]
mod tests {
    use crate::TestClock;
    use mac_policer::{Direction, MacAddr, PolicerConfig, PolicerEngine, Verdict};

    fn frame(dst: [u8; 6], src: [u8; 6], payload_len: usize) -> Vec<u8> {
        let mut frame = Vec::with_capacity(14 + payload_len);
        frame.extend_from_slice(&dst);
        frame.extend_from_slice(&src);
        frame.extend_from_slice(&[0x08, 0x00]); // IPv4
        frame.resize(14 + payload_len, 0xab);
        frame
    }

    const HOST: [u8; 6] = [0xb4, 0xde, 0x31, 0x13, 0xcd, 0xeb];
    const PEER: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

    fn engine() -> PolicerEngine<TestClock> {
        PolicerEngine::with_config(PolicerConfig::new(1), TestClock::new(0)).unwrap()
    }

    #[test]
    fn header_addresses_pick_the_policers() {
        let engine = engine();
        let host = MacAddr::from(HOST);
        engine.upsert(host, 100_000);

        // host is the destination here, so its destination bucket pays
        let packet = frame(HOST, PEER, 86); // 100 bytes on the wire
        assert_eq!(engine.classify_frame(&packet, 1_000, 0).unwrap(), Verdict::Admit);

        let policer = engine.store().find(host).unwrap();
        let rate = policer.rate();
        assert_eq!(policer.bucket(Direction::Source), rate.bucket_capacity);
        assert_eq!(
            policer.bucket(Direction::Destination),
            rate.bucket_capacity - ((100 * 8) << rate.scale)
        );
    }

    #[test]
    fn frame_length_is_counted_in_bits() {
        let engine = engine();
        engine.upsert(MacAddr::from(HOST), 100_000);

        // 1_000 bytes -> 8_000 bits, does not fit in a 100 ms credit
        let packet = frame(PEER, HOST, 986);
        assert_eq!(engine.classify_frame(&packet, 100, 0).unwrap(), Verdict::Drop);
        assert_eq!(engine.classify_frame(&packet, 1_000, 0).unwrap(), Verdict::Admit);
    }

    #[test]
    fn header_only_frame_is_accepted() {
        let engine = engine();
        let packet = frame(PEER, HOST, 0);
        assert_eq!(engine.classify_frame(&packet, 0, 0).unwrap(), Verdict::Admit);
        assert_eq!(engine.stats().admitted, 1);
    }
}
