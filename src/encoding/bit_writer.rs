use alloc::vec::Vec;

/// An interface for writing an arbitrary number of bits into a buffer
pub struct BitWriter {
    /// The buffer that's filled with bits
    output: Vec<u8>,
    /// The index pointing to the next unoccupied bit. Effectively just
    /// the number of bits that have been written into the buffer so far.
    bit_idx: usize,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_bits`, and
    /// obtain the output using `dump`
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            bit_idx: 0,
        }
    }

    pub fn with_capacity(num_bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(num_bytes),
            bit_idx: 0,
        }
    }

    /// Write the lowest `num_bits` of `bits` into the writer.
    ///
    /// `num_bits` refers to how many bits starting from the *least significant position*,
    /// but the bits will be written starting from the *most significant position*, continuing
    /// to the least significant position. A code `0b011` of length 3 ends up in the buffer
    /// as `0`, `1`, `1`.
    ///
    /// # Panics
    /// Will panic if `num_bits` is larger than 64.
    pub fn write_bits(&mut self, bits: u64, num_bits: u8) {
        assert!(num_bits <= 64, "Can't write {num_bits} bits from a u64");
        let mut remaining = num_bits as usize;
        // Each iteration fills the current output byte as far as possible.
        //
        // 76543210 ◄─── Bit Index
        // 111───── ◄─── 3 bits already in the byte, 5 are free
        //    01◄──────── writing 0b01 shifts it left by (free - taken) = 3
        // 11101─── ◄─── merged with an OR
        while remaining > 0 {
            let bits_already_in_byte = self.bit_idx % 8;
            if bits_already_in_byte == 0 {
                self.output.push(0);
            }
            let free_bits_in_current_byte = 8 - bits_already_in_byte;
            let take = free_bits_in_current_byte.min(remaining);
            // the highest `take` bits of what is left to write
            let chunk = ((bits >> (remaining - take)) & ((1 << take) - 1)) as u8;
            let last = self.output.len() - 1;
            self.output[last] |= chunk << (free_bits_in_current_byte - take);

            remaining -= take;
            self.bit_idx += take;
        }
    }

    /// Number of bits written so far, without padding.
    pub fn bits_written(&self) -> usize {
        self.bit_idx
    }

    /// Returns the populated buffer that you've been writing bits into.
    /// The unused low bits of the final byte are zero.
    ///
    /// This function consumes the writer, so it cannot be used after
    /// dumping
    pub fn dump(self) -> Vec<u8> {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::BitWriter;
    use alloc::vec;

    #[test]
    fn single_byte_written_4_4() {
        // Write the first 4 bits as 1s and the last 4 bits as 0s
        // 1010 is used where values should never be read from.
        let mut bw: BitWriter = BitWriter::new();
        bw.write_bits(0b1010_1111, 4);
        bw.write_bits(0b1010_0000, 4);
        let output = bw.dump();
        assert!(output.len() == 1, "Single byte written into writer returned a vec that wasn't one byte, vec was {} elements long", output.len());
        assert_eq!(
            0b1111_0000, output[0],
            "4 bits and 4 bits written into buffer"
        );
    }

    #[test]
    fn single_byte_written_3_5() {
        // Write the first 3 bits as 1s and the last 5 bits as 0s
        let mut bw: BitWriter = BitWriter::new();
        bw.write_bits(0b0101_0111, 3);
        bw.write_bits(0b1010_0000, 5);
        let output = bw.dump();
        assert!(output.len() == 1, "Single byte written into writer return a vec that wasn't one byte, vec was {} elements long", output.len());
        assert_eq!(0b1110_0000, output[0], "3 and 5 bits written into buffer");
    }

    #[test]
    fn single_byte_written_8() {
        // Write an entire byte
        let mut bw = BitWriter::new();
        bw.write_bits(1, 8);
        assert_eq!(bw.bits_written(), 8);
        assert_eq!(vec![1], bw.dump());
    }

    #[test]
    fn multi_byte_clean_boundary_4_4_4_4() {
        // Writing 4 bits at a time for 2 bytes
        let mut bw = BitWriter::new();
        bw.write_bits(0, 4);
        bw.write_bits(0b1111, 4);
        bw.write_bits(0b1111, 4);
        bw.write_bits(0, 4);
        assert_eq!(vec![0b0000_1111, 0b1111_0000], bw.dump());
    }

    #[test]
    fn multi_byte_boundary_crossed_4_5_7() {
        // Writing 4 1s and then 5 zeros then 7 1s
        let mut bw = BitWriter::new();
        bw.write_bits(0b0000_1111, 4);
        bw.write_bits(0b1010_0000, 5);
        bw.write_bits(0b0111_1111, 7);
        assert_eq!(vec![0b1111_0000, 0b0111_1111], bw.dump());
    }

    #[test]
    fn long_code_spans_three_bytes() {
        let mut bw = BitWriter::new();
        bw.write_bits(0b1, 1);
        bw.write_bits(0b1_0000_0000_0000_0001, 17);
        assert_eq!(bw.bits_written(), 18);
        assert_eq!(vec![0b1100_0000, 0b0000_0000, 0b0100_0000], bw.dump());
    }

    #[test]
    fn full_width_write() {
        let mut bw = BitWriter::new();
        bw.write_bits(0b101, 3);
        bw.write_bits(u64::MAX, 64);
        let output = bw.dump();
        assert_eq!(output.len(), 9);
        assert_eq!(output[0], 0b1011_1111);
        assert!(output[1..8].iter().all(|byte| *byte == 0xFF));
        assert_eq!(output[8], 0b1110_0000);
    }

    #[test]
    fn pads_unaligned_dump() {
        // A single bit still occupies a whole byte, the rest is zero padding
        let mut bw = BitWriter::new();
        bw.write_bits(1, 1);
        assert_eq!(bw.bits_written(), 1);
        assert_eq!(vec![0b1000_0000], bw.dump());
    }

    #[test]
    fn zero_bits_write_nothing() {
        let mut bw = BitWriter::new();
        bw.write_bits(0xFF, 0);
        assert_eq!(bw.bits_written(), 0);
        assert!(bw.dump().is_empty());
    }
}
