// Wire-level checks for:
// * encode_control_frame
// * encode_data_frame
// * parse_control_body
// * FrameStreamWriter ordering

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use capture_core::stream::framing::decode::{check_control_len, check_data_len};
    use capture_core::stream::framing::{
        encode_control_frame, encode_data_frame, parse_control_body, ControlType, DecoderState,
        ProtocolError,
    };
    use capture_core::stream::FrameStreamWriter;
    use capture_core::types::StreamError;

    #[test]
    fn control_codes_match_wire_contract() {
        assert_eq!(ControlType::Accept as u32, 1);
        assert_eq!(ControlType::Start as u32, 2);
        assert_eq!(ControlType::Stop as u32, 3);
        assert_eq!(ControlType::Ready as u32, 4);
        assert_eq!(ControlType::Finish as u32, 5);
    }

    #[test]
    fn control_frame_layout() {
        let wire = encode_control_frame(ControlType::Accept, b"xy").unwrap();
        assert_eq!(
            wire,
            vec![0, 0, 0, 0, 0, 0, 0, 6, 0, 0, 0, 1, b'x', b'y']
        );
    }

    #[test]
    fn bare_control_frame_layout() {
        let wire = encode_control_frame(ControlType::Finish, &[]).unwrap();
        assert_eq!(wire, vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 5]);
    }

    #[test]
    fn data_frame_layout() {
        let wire = encode_data_frame(b"abc").unwrap();
        assert_eq!(wire, vec![0, 0, 0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn empty_data_frame_is_rejected() {
        assert!(matches!(encode_data_frame(&[]), Err(ProtocolError::EmptyDataFrame)));
    }

    #[test]
    fn control_body_splits_type_and_options() {
        let body = Bytes::from_static(&[0, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0, 2, b'p', b'b']);
        let frame = parse_control_body(body).unwrap();

        assert_eq!(frame.control_type, ControlType::Ready);
        assert_eq!(&frame.options[..], &[0, 0, 0, 1, 0, 0, 0, 2, b'p', b'b']);
    }

    #[test]
    fn unknown_control_type_is_rejected() {
        let body = Bytes::from_static(&[0, 0, 0, 9]);
        assert!(matches!(
            parse_control_body(body),
            Err(ProtocolError::UnknownControlType(9))
        ));
    }

    #[test]
    fn short_control_body_is_rejected() {
        let body = Bytes::from_static(&[0, 0, 2]);
        assert!(matches!(
            parse_control_body(body),
            Err(ProtocolError::Truncated { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn control_length_bounds() {
        assert!(matches!(check_control_len(3, 512), Err(ProtocolError::ControlLength { len: 3, .. })));
        assert!(matches!(check_control_len(513, 512), Err(ProtocolError::ControlLength { len: 513, .. })));
        assert_eq!(check_control_len(4, 512).unwrap(), 4);
        assert_eq!(check_control_len(512, 512).unwrap(), 512);
    }

    #[test]
    fn data_length_bound() {
        assert_eq!(check_data_len(10, 10).unwrap(), 10);
        assert!(matches!(check_data_len(11, 10), Err(ProtocolError::FrameTooLarge { len: 11, max: 10 })));
    }

    #[test]
    fn writer_emits_start_data_stop() {
        let mut w = FrameStreamWriter::new(Vec::new());
        w.start().unwrap();
        w.write_data(b"one").unwrap();
        w.write_data(b"two").unwrap();
        assert_eq!(w.frames_written(), 2);
        let out = w.stop().unwrap();

        let expected = [
            encode_control_frame(ControlType::Start, &[]).unwrap(),
            encode_data_frame(b"one").unwrap(),
            encode_data_frame(b"two").unwrap(),
            encode_control_frame(ControlType::Stop, &[]).unwrap(),
        ]
        .concat();
        assert_eq!(out, expected);
    }

    #[test]
    fn writer_rejects_data_before_start() {
        let mut w = FrameStreamWriter::new(Vec::new());
        assert!(matches!(
            w.write_data(b"early"),
            Err(StreamError::Protocol(ProtocolError::UnexpectedData { state: DecoderState::AwaitStart }))
        ));
    }

    #[test]
    fn writer_rejects_double_start_and_early_stop() {
        let mut w = FrameStreamWriter::new(Vec::new());
        w.start().unwrap();
        assert!(matches!(
            w.start(),
            Err(StreamError::Protocol(ProtocolError::UnexpectedControl { control: ControlType::Start, .. }))
        ));

        let fresh = FrameStreamWriter::new(Vec::new());
        assert!(matches!(
            fresh.stop(),
            Err(StreamError::Protocol(ProtocolError::UnexpectedControl { control: ControlType::Stop, .. }))
        ));
    }

    #[test]
    fn writer_start_options_are_carried() {
        let mut w = FrameStreamWriter::new(Vec::new());
        w.start_with_options(b"ct").unwrap();
        let out = w.stop().unwrap();
        assert_eq!(&out[..14], &encode_control_frame(ControlType::Start, b"ct").unwrap()[..]);
    }
}
