use crate::consts;
use crate::utils;
use std::fmt;

/// One fetched instruction word split into its addressing fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode {
    pub word: u16,
    pub op: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub nn: u8,
    pub nnn: u16,
}

impl From<[u8; consts::OP_CODE_BYTES]> for Opcode {
    fn from(bytes: [u8; consts::OP_CODE_BYTES]) -> Self {
        let (op, x, y, n) = utils::nibble_split(bytes);
        Opcode {
            word: u16::from_be_bytes(bytes),
            op,
            x,
            y,
            n,
            nn: bytes[1],
            nnn: u16::from_be_bytes(bytes) & 0x0FFF,
        }
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode::from(word.to_be_bytes())
    }
}

impl Opcode {
    /// Maps the word onto the instruction table, `None` when nothing matches.
    pub fn decode(&self) -> Option<Instruction> {
        use Instruction::*;

        let Opcode {
            op, x, y, n, nn, nnn, ..
        } = *self;
        let (x, y) = (x as usize, y as usize);

        let instr = match (op, x, y, n) {
            (0x0, 0, 0xE, 0x0) => Cls,
            (0x0, 0, 0xE, 0xE) => Ret,
            (0x1, _, _, _) => Jump { addr: nnn },
            (0x2, _, _, _) => Call { addr: nnn },
            (0x3, _, _, _) => SkipEqImm { x, nn },
            (0x4, _, _, _) => SkipNeImm { x, nn },
            (0x5, _, _, 0x0) => SkipEqReg { x, y },
            (0x6, _, _, _) => LoadImm { x, nn },
            (0x7, _, _, _) => AddImm { x, nn },
            (0x8, _, _, 0x0) => Move { x, y },
            (0x8, _, _, 0x1) => Or { x, y },
            (0x8, _, _, 0x2) => And { x, y },
            (0x8, _, _, 0x3) => Xor { x, y },
            (0x8, _, _, 0x4) => AddReg { x, y },
            (0x8, _, _, 0x5) => SubReg { x, y },
            (0x8, _, _, 0x6) => ShiftRight { x, y },
            (0x8, _, _, 0x7) => SubNeg { x, y },
            (0x8, _, _, 0xE) => ShiftLeft { x, y },
            (0x9, _, _, 0x0) => SkipNeReg { x, y },
            (0xA, _, _, _) => LoadIndex { addr: nnn },
            (0xB, _, _, _) => JumpOffset { addr: nnn },
            (0xC, _, _, _) => Random { x, nn },
            (0xD, _, _, _) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => SkipKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadFont { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            _ => return None,
        };
        Some(instr)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.word)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Cls,
    Ret,
    Jump { addr: u16 },
    Call { addr: u16 },
    SkipEqImm { x: usize, nn: u8 },
    SkipNeImm { x: usize, nn: u8 },
    SkipEqReg { x: usize, y: usize },
    LoadImm { x: usize, nn: u8 },
    AddImm { x: usize, nn: u8 },
    Move { x: usize, y: usize },
    Or { x: usize, y: usize },
    And { x: usize, y: usize },
    Xor { x: usize, y: usize },
    AddReg { x: usize, y: usize },
    SubReg { x: usize, y: usize },
    ShiftRight { x: usize, y: usize },
    SubNeg { x: usize, y: usize },
    ShiftLeft { x: usize, y: usize },
    SkipNeReg { x: usize, y: usize },
    LoadIndex { addr: u16 },
    JumpOffset { addr: u16 },
    Random { x: usize, nn: u8 },
    Draw { x: usize, y: usize, n: u8 },
    SkipKeyPressed { x: usize },
    SkipKeyNotPressed { x: usize },
    LoadDelay { x: usize },
    WaitKey { x: usize },
    SetDelay { x: usize },
    SetSound { x: usize },
    AddIndex { x: usize },
    LoadFont { x: usize },
    StoreBcd { x: usize },
    StoreRegisters { x: usize },
    LoadRegisters { x: usize },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipEqImm { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipNeImm { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            AddImm { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            SubReg { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, .. } => write!(f, "SHR V{:X}", x),
            SubNeg { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, .. } => write!(f, "SHL V{:X}", x),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadFont { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let op = Opcode::from([0xD1, 0x2F]);
        assert_eq!(op.word, 0xD12F);
        assert_eq!(op.op, 0xD);
        assert_eq!(op.x, 0x1);
        assert_eq!(op.y, 0x2);
        assert_eq!(op.n, 0xF);
        assert_eq!(op.nn, 0x2F);
        assert_eq!(op.nnn, 0x12F);
    }

    #[test]
    fn test_decode_table() {
        let table: [(u16, Instruction); 34] = [
            (0x00E0, Instruction::Cls),
            (0x00EE, Instruction::Ret),
            (0x1ABC, Instruction::Jump { addr: 0xABC }),
            (0x2ABC, Instruction::Call { addr: 0xABC }),
            (0x3142, Instruction::SkipEqImm { x: 1, nn: 0x42 }),
            (0x4142, Instruction::SkipNeImm { x: 1, nn: 0x42 }),
            (0x5120, Instruction::SkipEqReg { x: 1, y: 2 }),
            (0x6142, Instruction::LoadImm { x: 1, nn: 0x42 }),
            (0x7142, Instruction::AddImm { x: 1, nn: 0x42 }),
            (0x8120, Instruction::Move { x: 1, y: 2 }),
            (0x8121, Instruction::Or { x: 1, y: 2 }),
            (0x8122, Instruction::And { x: 1, y: 2 }),
            (0x8123, Instruction::Xor { x: 1, y: 2 }),
            (0x8124, Instruction::AddReg { x: 1, y: 2 }),
            (0x8125, Instruction::SubReg { x: 1, y: 2 }),
            (0x8126, Instruction::ShiftRight { x: 1, y: 2 }),
            (0x8127, Instruction::SubNeg { x: 1, y: 2 }),
            (0x812E, Instruction::ShiftLeft { x: 1, y: 2 }),
            (0x9120, Instruction::SkipNeReg { x: 1, y: 2 }),
            (0xAABC, Instruction::LoadIndex { addr: 0xABC }),
            (0xBABC, Instruction::JumpOffset { addr: 0xABC }),
            (0xC10F, Instruction::Random { x: 1, nn: 0x0F }),
            (0xD125, Instruction::Draw { x: 1, y: 2, n: 5 }),
            (0xE19E, Instruction::SkipKeyPressed { x: 1 }),
            (0xE1A1, Instruction::SkipKeyNotPressed { x: 1 }),
            (0xF107, Instruction::LoadDelay { x: 1 }),
            (0xF10A, Instruction::WaitKey { x: 1 }),
            (0xF115, Instruction::SetDelay { x: 1 }),
            (0xF118, Instruction::SetSound { x: 1 }),
            (0xF11E, Instruction::AddIndex { x: 1 }),
            (0xF129, Instruction::LoadFont { x: 1 }),
            (0xF133, Instruction::StoreBcd { x: 1 }),
            (0xF155, Instruction::StoreRegisters { x: 1 }),
            (0xF165, Instruction::LoadRegisters { x: 1 }),
        ];
        for (word, expected) in table {
            assert_eq!(Opcode::from(word).decode(), Some(expected), "{:04X}", word);
        }
    }

    #[test]
    fn test_decode_unknown() {
        for word in [
            0x0000u16, 0x0123, 0x00E1, 0x5121, 0x8128, 0x812F, 0x9121, 0xE100, 0xF100, 0xF1FF,
        ] {
            assert_eq!(Opcode::from(word).decode(), None, "{:04X}", word);
        }
    }

    #[test]
    fn test_mnemonic() {
        assert_eq!(
            Opcode::from(0xD125u16).decode().map(|i| i.to_string()),
            Some("DRW V1, V2, 5".into())
        );
        assert_eq!(
            Opcode::from(0x632Au16).decode().map(|i| i.to_string()),
            Some("LD V3, 0x2A".into())
        );
        assert_eq!(Opcode::from(0x632Au16).to_string(), "632A");
    }
}
