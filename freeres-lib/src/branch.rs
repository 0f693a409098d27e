use crate::{Error, Result};

/// Length of a near `call rel32` / `jmp rel32`.
pub const BRANCH_LEN: usize = 5;
pub const NOP: u8 = 0x90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchType {
    Call,
    Jump,
}

impl BranchType {
    const fn opcode(self) -> u8 {
        match self {
            Self::Call => 0xe8,
            Self::Jump => 0xe9,
        }
    }

    fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0xe8 => Some(Self::Call),
            0xe9 => Some(Self::Jump),
            _ => None,
        }
    }
}

fn displacement(next_instruction: usize, destination: usize) -> Option<i32> {
    if cfg!(target_pointer_width = "32") {
        // The CPU wraps around the 4 GiB address space.
        Some(destination.wrapping_sub(next_instruction) as i32)
    } else {
        i32::try_from(destination as i64 - next_instruction as i64).ok()
    }
}

/// Encodes a branch at `addr` to `destination`, padded with NOPs up to `size`.
pub fn encode_branch(
    addr: usize,
    branch_type: BranchType,
    destination: usize,
    size: usize,
) -> Result<Vec<u8>> {
    if size < BRANCH_LEN {
        return Err(Error::BranchTooShort { size });
    }
    let next_instruction = addr.wrapping_add(BRANCH_LEN);
    let rel32 = displacement(next_instruction, destination).ok_or(Error::BranchOutOfRange {
        from: addr,
        to: destination,
    })?;

    let mut bytes = Vec::with_capacity(size);
    bytes.push(branch_type.opcode());
    bytes.extend_from_slice(&rel32.to_le_bytes());
    bytes.resize(size, NOP);
    Ok(bytes)
}

/// Reads back a branch written at `addr`. Trailing bytes are ignored.
pub fn decode_branch(addr: usize, bytes: &[u8]) -> Option<(BranchType, usize)> {
    let (&opcode, rest) = bytes.split_first()?;
    let branch_type = BranchType::from_opcode(opcode)?;
    let rel32 = i32::from_le_bytes(rest.get(..4)?.try_into().ok()?);
    let destination = addr
        .wrapping_add(BRANCH_LEN)
        .wrapping_add_signed(rel32 as isize);
    Some((branch_type, destination))
}
