use byteorder::{ByteOrder, LittleEndian};

use crate::error::Error;

pub const HEADER_SIZE: usize = 24;

pub const CMD_PUSH: u8 = 81;
pub const CMD_ACK: u8 = 82;
pub const CMD_WASK: u8 = 83;
pub const CMD_WINS: u8 = 84;

// first eight fields go on the wire; resendts/rto/fastack/xmit are local
// bookkeeping kept while the segment sits in snd_buf, never serialized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub conv: u32,
    pub cmd: u8,
    pub frg: u8,
    pub wnd: u16,
    pub ts: u32,
    pub sn: u32,
    pub una: u32,
    pub data: Vec<u8>,

    pub resendts: u32,
    pub rto: u32,
    pub fastack: u32,
    pub xmit: u32,
}

impl Segment {
    pub fn new(cmd: u8, data: Vec<u8>) -> Self {
        Segment {
            cmd,
            data,
            ..Default::default()
        }
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.data.len()
    }

    pub fn encode(&self, buf: &mut Vec<u8>) {
        let mut header = [0u8; HEADER_SIZE];
        LittleEndian::write_u32(&mut header[0..4], self.conv);
        header[4] = self.cmd;
        header[5] = self.frg;
        LittleEndian::write_u16(&mut header[6..8], self.wnd);
        LittleEndian::write_u32(&mut header[8..12], self.ts);
        LittleEndian::write_u32(&mut header[12..16], self.sn);
        LittleEndian::write_u32(&mut header[16..20], self.una);
        LittleEndian::write_u32(&mut header[20..24], self.data.len() as u32);

        buf.extend_from_slice(&header);
        buf.extend_from_slice(&self.data);
    }

    // returns the decoded segment and the number of bytes it consumed
    pub fn decode(buf: &[u8], expected_conv: u32) -> Result<(Self, usize), Error> {
        if buf.len() < HEADER_SIZE {
            return Err(Error::MalformedInput(format!(
                "segment header needs {HEADER_SIZE} bytes, have {}",
                buf.len()
            )));
        }

        let conv = LittleEndian::read_u32(&buf[0..4]);
        if conv != expected_conv {
            return Err(Error::MalformedInput(format!(
                "conv mismatch: expected {expected_conv}, got {conv}"
            )));
        }

        let cmd = buf[4];
        let frg = buf[5];
        let wnd = LittleEndian::read_u16(&buf[6..8]);
        let ts = LittleEndian::read_u32(&buf[8..12]);
        let sn = LittleEndian::read_u32(&buf[12..16]);
        let una = LittleEndian::read_u32(&buf[16..20]);
        let len = LittleEndian::read_u32(&buf[20..24]) as usize;

        if !matches!(cmd, CMD_PUSH | CMD_ACK | CMD_WASK | CMD_WINS) {
            return Err(Error::MalformedInput(format!("unknown cmd {cmd}")));
        }

        if buf.len() - HEADER_SIZE < len {
            return Err(Error::MalformedInput(format!(
                "declared payload length {len} exceeds remaining {} bytes",
                buf.len() - HEADER_SIZE
            )));
        }

        let data = buf[HEADER_SIZE..HEADER_SIZE + len].to_vec();

        Ok((
            Segment {
                conv,
                cmd,
                frg,
                wnd,
                ts,
                sn,
                una,
                data,
                resendts: 0,
                rto: 0,
                fastack: 0,
                xmit: 0,
            },
            HEADER_SIZE + len,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_header_and_payload() {
        let seg = Segment {
            conv: 0x1122_3344,
            cmd: CMD_PUSH,
            frg: 3,
            wnd: 128,
            ts: 99_001,
            sn: 42,
            una: 40,
            data: b"hello kcp".to_vec(),
            resendts: 0,
            rto: 0,
            fastack: 0,
            xmit: 0,
        };

        let mut buf = Vec::new();
        seg.encode(&mut buf);
        assert_eq!(buf.len(), seg.encoded_len());

        let (decoded, consumed) = Segment::decode(&buf, 0x1122_3344).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded.conv, seg.conv);
        assert_eq!(decoded.cmd, seg.cmd);
        assert_eq!(decoded.frg, seg.frg);
        assert_eq!(decoded.wnd, seg.wnd);
        assert_eq!(decoded.ts, seg.ts);
        assert_eq!(decoded.sn, seg.sn);
        assert_eq!(decoded.una, seg.una);
        assert_eq!(decoded.data, seg.data);
    }

    #[test]
    fn rejects_conv_mismatch() {
        let seg = Segment::new(CMD_ACK, Vec::new());
        let mut buf = Vec::new();
        seg.encode(&mut buf);

        assert!(Segment::decode(&buf, 7).is_err());
    }

    #[test]
    fn rejects_truncated_header() {
        assert!(Segment::decode(&[0u8; 10], 0).is_err());
    }

    #[test]
    fn rejects_overrunning_length_field() {
        let mut buf = vec![0u8; HEADER_SIZE];
        LittleEndian::write_u32(&mut buf[20..24], 100);
        assert!(Segment::decode(&buf, 0).is_err());
    }

    #[test]
    fn multiple_segments_concatenate() {
        let a = Segment::new(CMD_PUSH, b"a".to_vec());
        let b = Segment::new(CMD_ACK, Vec::new());

        let mut buf = Vec::new();
        a.encode(&mut buf);
        b.encode(&mut buf);

        let (first, used) = Segment::decode(&buf, 0).unwrap();
        assert_eq!(first.data, b"a");
        let (second, used2) = Segment::decode(&buf[used..], 0).unwrap();
        assert_eq!(second.cmd, CMD_ACK);
        assert_eq!(used + used2, buf.len());
    }
}
