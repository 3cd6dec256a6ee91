use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::{Book, BookId};

use super::errors::{LendingError, Result};

/// カタログ - 書籍レジストリ
///
/// 書籍レコードの唯一の所有者。書籍1冊ごとが排他制御の単位になるよう、
/// レジストリは `Arc<Mutex<Book>>` のエントリを保持し、台帳は
/// `entry()` で共有ハンドルを取得してから個別ロックで状態遷移を行う。
///
/// IDは1から始まる連番で採番され、BTreeMapの走査順＝登録順になる。
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

struct CatalogInner {
    books: BTreeMap<BookId, Arc<Mutex<Book>>>,
    next_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                books: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 書籍を登録する
    ///
    /// バリデーション：title/authorは空でないこと、total_copies >= 1。
    pub fn add_book(&self, title: &str, author: &str, total_copies: u32) -> Result<Book> {
        let title = title.trim();
        let author = author.trim();
        if title.is_empty() {
            return Err(LendingError::InvalidInput("title must not be empty".into()));
        }
        if author.is_empty() {
            return Err(LendingError::InvalidInput(
                "author must not be empty".into(),
            ));
        }
        if total_copies < 1 {
            return Err(LendingError::InvalidInput(
                "total_copies must be at least 1".into(),
            ));
        }

        let mut inner = self.inner.write().unwrap();
        let id = BookId::new(inner.next_id);
        inner.next_id += 1;

        let book = Book::new(id, title.to_string(), author.to_string(), total_copies);
        inner.books.insert(id, Arc::new(Mutex::new(book.clone())));

        tracing::info!(book_id = %id, %title, total_copies, "Book added to catalog");
        Ok(book)
    }

    /// 書籍のスナップショットを取得する
    pub fn get_book(&self, id: BookId) -> Result<Book> {
        let entry = self.entry(id)?;
        let book = entry.lock().unwrap();
        Ok(book.clone())
    }

    /// 全書籍のスナップショットを登録順で返す
    ///
    /// 各書籍はそれぞれのロック下で複製されるため、適用途中の
    /// 状態遷移が見えることはない。
    pub fn list_books(&self) -> Vec<Book> {
        let inner = self.inner.read().unwrap();
        inner
            .books
            .values()
            .map(|entry| entry.lock().unwrap().clone())
            .collect()
    }

    /// 台帳用：書籍の共有ハンドルを取得する
    ///
    /// レジストリロックはハンドル取得の間だけ保持し、個別の書籍ロックは
    /// 呼び出し側（台帳）が固定順序で取得する。
    pub(crate) fn entry(&self, id: BookId) -> Result<Arc<Mutex<Book>>> {
        let inner = self.inner.read().unwrap();
        inner
            .books
            .get(&id)
            .cloned()
            .ok_or(LendingError::BookNotFound(id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
