use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ReadingPosition {
    pub page_number: u32,
    /// Raw input buffer; only committed on submit.
    pub page_number_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Moved(ReadingPosition),
    /// Parsed fine but names the page already shown.
    Unchanged,
    /// Unparseable or out of range; the buffer was reset.
    Reverted,
}

/// Bounded reading position, `1..=total_pages`.
#[derive(Debug, Clone)]
pub struct PageCursor {
    position: ReadingPosition,
    total_pages: u32,
}

impl PageCursor {
    pub fn new(start_page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let page_number = start_page.clamp(1, total_pages);
        Self {
            position: ReadingPosition {
                page_number,
                page_number_text: page_number.to_string(),
            },
            total_pages,
        }
    }

    pub fn page(&self) -> u32 {
        self.position.page_number
    }

    pub fn text(&self) -> &str {
        &self.position.page_number_text
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn position(&self) -> &ReadingPosition {
        &self.position
    }

    pub fn can_advance(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.position.page_number < self.total_pages,
            Direction::Backward => self.position.page_number > 1,
        }
    }

    /// `None` when the move would leave `1..=total_pages`.
    pub fn advance(&mut self, direction: Direction) -> Option<ReadingPosition> {
        if !self.can_advance(direction) {
            return None;
        }
        let page = match direction {
            Direction::Forward => self.position.page_number + 1,
            Direction::Backward => self.position.page_number - 1,
        };
        self.commit(page);
        Some(self.position.clone())
    }

    pub fn set_text(&mut self, text: String) {
        self.position.page_number_text = text;
    }

    pub fn revert_text(&mut self) {
        self.position.page_number_text = self.position.page_number.to_string();
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let parsed = self.position.page_number_text.trim().parse::<u32>().ok();
        match parsed {
            Some(page) if (1..=self.total_pages).contains(&page) => {
                if page == self.position.page_number {
                    self.revert_text();
                    SubmitOutcome::Unchanged
                } else {
                    self.commit(page);
                    SubmitOutcome::Moved(self.position.clone())
                }
            }
            _ => {
                self.revert_text();
                SubmitOutcome::Reverted
            }
        }
    }

    fn commit(&mut self, page: u32) {
        self.position.page_number = page;
        self.position.page_number_text = page.to_string();
    }
}
