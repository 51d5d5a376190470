/// Paradox table file structure constants.
///
/// All header integers are little-endian. Field data inside records is
/// big-endian with a biased sign byte.
// Table header
pub const PX_RECORD_SIZE: usize = 0x00; // u16 - bytes per record
pub const PX_HEADER_SIZE: usize = 0x02; // u16 - header length, also the block stride
pub const PX_NUM_FIELDS: usize = 0x21; // u16 - number of field descriptors
pub const SIZE_PX_HEADER_MIN: usize = PX_NUM_FIELDS + 2;

// Field descriptor table: one (type, size) byte pair per field
pub const PX_FIELD_INFO: usize = 0x78;
pub const SIZE_PX_FIELD_INFO: usize = 2;

// Between the descriptor table and the field names:
//   table name pointer (4) + field name pointers (4 per field) + table name (261)
pub const SIZE_PX_TABLE_NAME_PTR: usize = 4;
pub const SIZE_PX_FIELD_NAME_PTR: usize = 4;
pub const SIZE_PX_TABLE_NAME: usize = 261;

// Field names are NUL-terminated
pub const PX_NAME_DELIMITER: u8 = 0x00;

// Data block header (6 bytes at the start of every block)
pub const SIZE_PX_BLOCK_HEAD: usize = 6;
pub const PX_BLOCK_NEXT: usize = 0; // u16 - next block number
pub const PX_BLOCK_PREV: usize = 2; // u16 - previous block number
pub const PX_BLOCK_ADD_SIZE: usize = 4; // u16 - offset of the last record in the block
pub const SIZE_PX_BLOCK_PTR: usize = 2;

// Data blocks start at index 1 (block 0 is the table header)
pub const PX_FIRST_BLOCK: u64 = 1;

// add_size values above this mark a corrupt or sentinel block
pub const PX_ADD_SIZE_MAX: u16 = 32767;

// Integer fields store non-negative values with the first byte biased to 0x80
pub const PX_INT_SIGN_BIAS: u8 = 0x80;
pub const SIZE_PX_INT_VALUE: usize = 4;

// Timestamp fields: top bit of the first byte is a sign flag
pub const PX_TIMESTAMP_SIGN_MASK: u8 = 0x7f;
pub const SIZE_PX_TIMESTAMP: usize = 8;
pub const PX_TIMESTAMP_SHIFT: u32 = 8;
pub const PX_TIMESTAMP_DIVISOR: i64 = 500;
pub const PX_TIMESTAMP_EPOCH: i64 = 37_603_860_709_183;
pub const PX_TIMESTAMP_BIAS_SECS: i64 = 10_800;
pub const SECS_PER_HOUR: i64 = 3600;
