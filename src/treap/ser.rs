//! Serde support. A treap is represented as the sequence of its keys in ascending order; priorities
//! are not serialized and are drawn again on deserialization.

use crate::treap::set::Treap;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<T: Serialize> Serialize for Treap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for key in self {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

struct TreapVisitor<T> {
    marker: PhantomData<fn() -> Treap<T>>,
}

impl<'de, T: Deserialize<'de> + Ord> Visitor<'de> for TreapVisitor<T> {
    type Value = Treap<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut treap = Treap::new();
        while let Some(key) = seq.next_element()? {
            treap.insert(key);
        }
        Ok(treap)
    }
}

impl<'de, T: Deserialize<'de> + Ord> Deserialize<'de> for Treap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(TreapVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::treap::Treap;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_ser_de() {
        let treap: Treap<u32> = vec![3, 1, 2].into_iter().collect();
        assert_tokens(
            &treap,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_ser_de_empty() {
        let treap: Treap<u32> = Treap::new();
        assert_tokens(&treap, &[Token::Seq { len: Some(0) }, Token::SeqEnd]);
    }

    #[test]
    fn test_de_ignores_duplicates() {
        let treap: Treap<u32> = vec![1, 2].into_iter().collect();
        assert_de_tokens(
            &treap,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(2),
                Token::U32(1),
                Token::U32(2),
                Token::SeqEnd,
            ],
        );
    }
}
