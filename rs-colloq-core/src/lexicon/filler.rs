use std::path::Path;

use super::Position;
use crate::errors::{ColloqError, Result};
use crate::io::read_lines;
use crate::random::RandomSource;

const BLOCKS: [(Position, &str, &str); 3] = [
	(Position::Beginning, "<beginning>", "</beginning>"),
	(Position::Middle, "<middle>", "</middle>"),
	(Position::End, "<end>", "</end>"),
];

/// Filler words grouped by the position they are inserted at.
///
/// # File format
/// One word or tag per line, with three blocks in this exact order:
/// ```text
/// <beginning>
/// no
/// </beginning>
/// <middle>
/// prostě
/// </middle>
/// <end>
/// jo
/// </end>
/// ```
/// Every line is trimmed before use, so tags and words may carry surrounding
/// whitespace (`"  <middle> "` is the `<middle>` tag). Blank lines are ignored.
/// Any tag out of order, a word outside a block, a block left open at the end of
/// the file or an empty block is a load error.
///
/// # Invariants
/// - None of the three lists is empty
#[derive(Debug, Clone)]
pub struct FillerWords {
	beginning: Vec<String>,
	middle: Vec<String>,
	end: Vec<String>,
}

/// Where the parser is within the block sequence.
enum Expect {
	Open(usize),
	Close(usize),
	Done,
}

impl Expect {
	fn tag(&self) -> &'static str {
		match self {
			Expect::Open(block) => BLOCKS[*block].1,
			Expect::Close(block) => BLOCKS[*block].2,
			Expect::Done => "end of file",
		}
	}
}

impl FillerWords {
	/// Loads the filler words from a file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or is malformed.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let fillers = Self::from_lines(read_lines(&filepath)?)?;
		log::info!(
			"Loaded filler words from {} (beginning: {}, middle: {}, end: {})",
			filepath.as_ref().display(),
			fillers.beginning.len(),
			fillers.middle.len(),
			fillers.end.len()
		);
		Ok(fillers)
	}

	/// Parses already read lines.
	///
	/// # Errors
	/// See the type level documentation for the rejected inputs.
	pub fn from_lines<I, S>(lines: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut lists: [Vec<String>; 3] = Default::default();
		let mut expect = Expect::Open(0);

		for (number, line) in lines.into_iter().enumerate() {
			let word = line.as_ref().trim();
			if word.is_empty() {
				continue;
			}

			let is_tag = BLOCKS.iter().any(|(_, open, close)| word == *open || word == *close);
			if is_tag {
				expect = match expect {
					Expect::Open(block) if word == BLOCKS[block].1 => Expect::Close(block),
					Expect::Close(block) if word == BLOCKS[block].2 => {
						if block + 1 < BLOCKS.len() {
							Expect::Open(block + 1)
						} else {
							Expect::Done
						}
					}
					other => {
						return Err(ColloqError::UnexpectedFillerTag {
							line: number + 1,
							expected: other.tag().to_owned(),
							found: word.to_owned(),
						});
					}
				};
				continue;
			}

			match expect {
				Expect::Close(block) => lists[block].push(word.to_owned()),
				ref other => {
					return Err(ColloqError::FillerWordOutsideBlock {
						line: number + 1,
						word: word.to_owned(),
						expected: other.tag().to_owned(),
					});
				}
			}
		}

		if !matches!(expect, Expect::Done) {
			return Err(ColloqError::UnclosedFillerBlock { expected: expect.tag().to_owned() });
		}

		let [beginning, middle, end] = lists;
		let fillers = Self { beginning, middle, end };
		for (position, _, _) in BLOCKS {
			if fillers.list(position).is_empty() {
				return Err(ColloqError::EmptyFillerList(position));
			}
		}
		Ok(fillers)
	}

	/// All candidates for a position, in file order.
	pub fn list(&self, position: Position) -> &[String] {
		match position {
			Position::Beginning => &self.beginning,
			Position::Middle => &self.middle,
			Position::End => &self.end,
		}
	}

	/// Picks one word for the position uniformly at random.
	pub fn pick<R: RandomSource + ?Sized>(&self, position: Position, rng: &mut R) -> &str {
		let list = self.list(position);
		// Lists are never empty, see the invariants.
		let index = rng.next_in(0, list.len());
		list.get(index).map_or("", String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::random::ScriptedRandom;

	const VALID: &str = "<beginning>\nno\ntakže\n</beginning>\n\n<middle>\nprostě\nvlastně\n</middle>\n<end>\njo\n</end>\n";

	#[test]
	fn parses_three_blocks() {
		let fillers = FillerWords::from_lines(VALID.lines()).unwrap();
		assert_eq!(fillers.list(Position::Beginning), ["no", "takže"]);
		assert_eq!(fillers.list(Position::Middle), ["prostě", "vlastně"]);
		assert_eq!(fillers.list(Position::End), ["jo"]);
	}

	#[test]
	fn pick_uses_the_random_index() {
		let fillers = FillerWords::from_lines(VALID.lines()).unwrap();
		let mut rng = ScriptedRandom::new([1, 0, 0]);
		assert_eq!(fillers.pick(Position::Middle, &mut rng), "vlastně");
		assert_eq!(fillers.pick(Position::Beginning, &mut rng), "no");
		assert_eq!(fillers.pick(Position::End, &mut rng), "jo");
	}

	#[test]
	fn loads_file_starting_with_byte_order_mark() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("filler-words.xml");
		std::fs::write(&path, format!("\u{feff}{VALID}")).unwrap();
		let fillers = FillerWords::load(&path).unwrap();
		assert_eq!(fillers.list(Position::Beginning), ["no", "takže"]);
	}

	#[test]
	fn surrounding_whitespace_is_trimmed() {
		let input = ["  <beginning>", " no ", "</beginning>\t", "  <middle> ", "prostě", "</middle>", "<end>", "jo", " </end>"];
		let fillers = FillerWords::from_lines(input).unwrap();
		assert_eq!(fillers.list(Position::Beginning), ["no"]);
		assert_eq!(fillers.list(Position::Middle), ["prostě"]);
	}

	#[test]
	fn missing_closing_tag_is_rejected() {
		let input = "<beginning>\nno\n</beginning>\n<middle>\nprostě\n</middle>\n<end>\njo\n";
		let err = FillerWords::from_lines(input.lines()).unwrap_err();
		assert!(matches!(err, ColloqError::UnclosedFillerBlock { ref expected } if expected == "</end>"));
	}

	#[test]
	fn out_of_order_tag_is_rejected() {
		let input = "<middle>\nprostě\n</middle>\n";
		let err = FillerWords::from_lines(input.lines()).unwrap_err();
		assert!(matches!(
			err,
			ColloqError::UnexpectedFillerTag { line: 1, ref expected, ref found }
				if expected == "<beginning>" && found == "<middle>"
		));
	}

	#[test]
	fn word_before_any_block_is_rejected() {
		let err = FillerWords::from_lines(["prostě", "<beginning>"]).unwrap_err();
		assert!(matches!(err, ColloqError::FillerWordOutsideBlock { line: 1, .. }));
	}

	#[test]
	fn word_between_blocks_is_rejected() {
		let input = "<beginning>\nno\n</beginning>\nprostě\n";
		let err = FillerWords::from_lines(input.lines()).unwrap_err();
		assert!(matches!(err, ColloqError::FillerWordOutsideBlock { line: 4, .. }));
	}

	#[test]
	fn trailing_tag_after_end_is_rejected() {
		let input = format!("{VALID}<beginning>\n");
		assert!(FillerWords::from_lines(input.lines()).is_err());
	}

	#[test]
	fn empty_block_is_rejected() {
		let input = "<beginning>\nno\n</beginning>\n<middle>\n</middle>\n<end>\njo\n</end>\n";
		let err = FillerWords::from_lines(input.lines()).unwrap_err();
		assert!(matches!(err, ColloqError::EmptyFillerList(Position::Middle)));
	}
}
