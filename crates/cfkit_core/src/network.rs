//! IPv4 address blocks and subnet allocation.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{NetworkError, NetworkResult};

/// An IPv4 network in CIDR notation.
///
/// Host bits are masked on construction, so `10.0.3.7/16` and `10.0.0.0/16`
/// denote the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkBlock {
    network: u32,
    prefix: u8,
}

impl NetworkBlock {
    pub fn new(address: Ipv4Addr, prefix: u8) -> NetworkResult<Self> {
        if prefix > 32 {
            return Err(NetworkError::InvalidCidr(format!("{}/{}", address, prefix)));
        }
        Ok(Self {
            network: u32::from(address) & mask(prefix),
            prefix,
        })
    }

    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    fn last(&self) -> u32 {
        self.network | !mask(self.prefix)
    }

    /// Whether `other` lies entirely inside this block.
    pub fn contains(&self, other: &NetworkBlock) -> bool {
        other.prefix >= self.prefix && other.network & mask(self.prefix) == self.network
    }

    pub fn overlaps(&self, other: &NetworkBlock) -> bool {
        self.network <= other.last() && other.network <= self.last()
    }
}

fn mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

impl fmt::Display for NetworkBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix)
    }
}

impl FromStr for NetworkBlock {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetworkError::InvalidCidr(s.to_string());

        let (address, prefix) = s.trim().split_once('/').ok_or_else(invalid)?;
        let address = Ipv4Addr::from_str(address).map_err(|_| invalid())?;
        let prefix = prefix.parse::<u8>().map_err(|_| invalid())?;

        Self::new(address, prefix)
    }
}

impl Serialize for NetworkBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Carves a parent block into equally sized child blocks, in ascending
/// address order, without overlap or reuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetAllocator {
    parent: NetworkBlock,
    prefix: u8,
    capacity: u64,
    cursor: u64,
}

impl SubnetAllocator {
    /// Partition `parent` into `/prefix` blocks.
    pub fn new(parent: NetworkBlock, prefix: u8) -> NetworkResult<Self> {
        if prefix < parent.prefix() || prefix > 32 {
            return Err(NetworkError::InvalidPrefixLength {
                parent: parent.to_string(),
                prefix,
            });
        }
        Ok(Self {
            parent,
            prefix,
            capacity: 1u64 << (u32::from(prefix) - u32::from(parent.prefix())),
            cursor: 0,
        })
    }

    /// An allocator with no blocks to hand out, for a parent that cannot be
    /// split into `/prefix` blocks.
    pub fn exhausted(parent: NetworkBlock, prefix: u8) -> Self {
        Self {
            parent,
            prefix,
            capacity: 0,
            cursor: 0,
        }
    }

    pub fn parent(&self) -> NetworkBlock {
        self.parent
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Total number of child blocks in the partition.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn remaining(&self) -> u64 {
        self.capacity() - self.cursor
    }

    /// The block the next call to [`next_block`](Self::next_block) returns.
    pub fn peek(&self) -> NetworkResult<NetworkBlock> {
        if self.cursor >= self.capacity {
            return Err(NetworkError::Exhausted {
                parent: self.parent.to_string(),
                prefix: self.prefix,
            });
        }
        let step = 1u64 << (32 - u32::from(self.prefix));
        let offset = self.cursor * step;
        // offset < parent.size() <= 2^32, and parent.network + offset stays
        // within the parent block.
        let network = self.parent.network + offset as u32;
        Ok(NetworkBlock {
            network,
            prefix: self.prefix,
        })
    }

    /// Hand out the next free block.
    pub fn next_block(&mut self) -> NetworkResult<NetworkBlock> {
        let block = self.peek()?;
        self.cursor += 1;
        debug!("Allocated subnet {} from {}", block, self.parent);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> NetworkBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_masks_host_bits() {
        let parsed = block("10.0.3.7/16");
        assert_eq!(parsed.to_string(), "10.0.0.0/16");
        assert_eq!(parsed.size(), 65536);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("10.0.0.0".parse::<NetworkBlock>(), Err(NetworkError::InvalidCidr(_))));
        assert!(matches!("10.0.0.0/33".parse::<NetworkBlock>(), Err(NetworkError::InvalidCidr(_))));
        assert!(matches!("10.0.0/16".parse::<NetworkBlock>(), Err(NetworkError::InvalidCidr(_))));
    }

    #[test]
    fn test_contains_and_overlaps() {
        let parent = block("10.0.0.0/16");
        assert!(parent.contains(&block("10.0.5.0/24")));
        assert!(!parent.contains(&block("10.1.0.0/24")));
        assert!(!block("10.0.5.0/24").contains(&parent));
        assert!(parent.overlaps(&block("10.0.255.0/24")));
        assert!(!block("10.0.0.0/24").overlaps(&block("10.0.1.0/24")));
    }

    #[test]
    fn test_sixteen_into_twenty_four_covers_parent() {
        let parent = block("10.0.0.0/16");
        let mut allocator = SubnetAllocator::new(parent, 24).unwrap();
        assert_eq!(allocator.capacity(), 256);

        let blocks: Vec<_> = (0..256).map(|_| allocator.next_block().unwrap()).collect();

        assert_eq!(blocks[0].to_string(), "10.0.0.0/24");
        assert_eq!(blocks[1].to_string(), "10.0.1.0/24");
        assert_eq!(blocks[255].to_string(), "10.0.255.0/24");
        assert!(blocks.windows(2).all(|w| w[0] < w[1] && !w[0].overlaps(&w[1])));
        assert!(blocks.iter().all(|b| parent.contains(b)));
        assert_eq!(blocks.iter().map(|b| b.size()).sum::<u64>(), parent.size());

        assert_eq!(
            allocator.next_block().unwrap_err(),
            NetworkError::Exhausted {
                parent: "10.0.0.0/16".to_string(),
                prefix: 24
            }
        );
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut allocator = SubnetAllocator::new(block("192.168.0.0/16"), 20).unwrap();
        assert_eq!(allocator.peek().unwrap(), allocator.peek().unwrap());
        assert_eq!(allocator.next_block().unwrap().to_string(), "192.168.0.0/20");
        assert_eq!(allocator.peek().unwrap().to_string(), "192.168.16.0/20");
        assert_eq!(allocator.remaining(), 15);
    }

    #[test]
    fn test_prefix_shorter_than_parent_rejected() {
        assert!(matches!(
            SubnetAllocator::new(block("10.0.0.0/24"), 16),
            Err(NetworkError::InvalidPrefixLength { prefix: 16, .. })
        ));
    }

    #[test]
    fn test_exhausted_allocator_hands_out_nothing() {
        let mut allocator = SubnetAllocator::exhausted(block("10.0.0.0/28"), 24);
        assert_eq!(allocator.capacity(), 0);
        assert_eq!(allocator.remaining(), 0);
        assert_eq!(
            allocator.next_block().unwrap_err(),
            NetworkError::Exhausted {
                parent: "10.0.0.0/28".to_string(),
                prefix: 24
            }
        );
    }

    #[test]
    fn test_whole_address_space() {
        let mut allocator = SubnetAllocator::new(block("0.0.0.0/0"), 1).unwrap();
        assert_eq!(allocator.next_block().unwrap().to_string(), "0.0.0.0/1");
        assert_eq!(allocator.next_block().unwrap().to_string(), "128.0.0.0/1");
        assert!(allocator.next_block().is_err());
    }
}
