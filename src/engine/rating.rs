// ==========================================
// КТП конфигуратор - извлечение номинального тока
// ==========================================
// Назначение: вытащить номинальный ток (А) из свободного
// наименования позиции прайс-листа
// Красная линия: порядок шаблонов фиксирован, срабатывает первый;
// отсутствие совпадения - штатный результат, не ошибка
// ==========================================

use tracing::trace;

// ==========================================
// RatingPattern - одна стратегия распознавания
// ==========================================
// Наименования в прайс-листах дрейфуют; новая манера записи тока
// добавляется новой стратегией, без правки мест вызова
pub trait RatingPattern: Send + Sync {
    /// Имя стратегии (для диагностики)
    fn name(&self) -> &'static str;

    /// Попытка извлечь ток из уже нормализованных токенов наименования
    fn extract(&self, tokens: &[String]) -> Option<u32>;
}

/// Токен состоит только из цифр - вернуть число
fn number_token(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Ведущие цифры токена ("250а," -> 250)
fn leading_number(token: &str) -> Option<u32> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Токен - обозначение ампера: латинское "a" или кириллическое "а"
fn is_amp_mark(token: &str) -> bool {
    token == "a" || token == "а"
}

// ==========================================
// Стратегии (в порядке применения)
// ==========================================

/// "... 250 А" в самом конце наименования; слитная запись "250А"
/// (характерна для меток тока справочника) тоже принимается
pub struct TrailingAmps;

impl RatingPattern for TrailingAmps {
    fn name(&self) -> &'static str {
        "trailing_amps"
    }

    fn extract(&self, tokens: &[String]) -> Option<u32> {
        if let [.., number, mark] = tokens {
            if is_amp_mark(mark) {
                return number_token(number);
            }
        }
        let last = tokens.last()?;
        let digits = last
            .strip_suffix('a')
            .or_else(|| last.strip_suffix('а'))?;
        number_token(digits)
    }
}

/// "... 250 А, ..." в середине наименования (обозначение с запятой)
pub struct MidAmpsComma;

impl RatingPattern for MidAmpsComma {
    fn name(&self) -> &'static str {
        "mid_amps_comma"
    }

    fn extract(&self, tokens: &[String]) -> Option<u32> {
        tokens.windows(2).find_map(|pair| {
            let mark = pair[1].as_str();
            if mark == "a," || mark == "а," {
                number_token(&pair[0])
            } else {
                None
            }
        })
    }
}

/// Обобщённое "NNN а" в любой позиции, знаки препинания после "а" допустимы
pub struct GenericAmps;

impl RatingPattern for GenericAmps {
    fn name(&self) -> &'static str {
        "generic_amps"
    }

    fn extract(&self, tokens: &[String]) -> Option<u32> {
        tokens.windows(2).find_map(|pair| {
            let mark = pair[1].trim_end_matches([',', '.', ';', ':', ')']);
            if is_amp_mark(mark) {
                number_token(&pair[0])
            } else {
                None
            }
        })
    }
}

/// "NNN ампер" / "NNN амп"
pub struct AmperesWord;

impl RatingPattern for AmperesWord {
    fn name(&self) -> &'static str {
        "amperes_word"
    }

    fn extract(&self, tokens: &[String]) -> Option<u32> {
        tokens.windows(2).find_map(|pair| {
            if pair[1].starts_with("амп") {
                number_token(&pair[0])
            } else {
                None
            }
        })
    }
}

/// "ток NNN" / "номинальный ток NNN"
pub struct CurrentWord;

impl RatingPattern for CurrentWord {
    fn name(&self) -> &'static str {
        "current_word"
    }

    fn extract(&self, tokens: &[String]) -> Option<u32> {
        tokens.windows(2).find_map(|pair| {
            if pair[0] == "ток" {
                leading_number(&pair[1])
            } else {
                None
            }
        })
    }
}

/// "Iн=NNN" / "I=NNN" (кириллическое "н" в индексе)
pub struct CurrentEquals;

impl RatingPattern for CurrentEquals {
    fn name(&self) -> &'static str {
        "current_equals"
    }

    fn extract(&self, tokens: &[String]) -> Option<u32> {
        tokens.iter().find_map(|token| {
            let rest = token
                .strip_prefix("iн=")
                .or_else(|| token.strip_prefix("i="))?;
            leading_number(rest)
        })
    }
}

// ==========================================
// RatingExtractor - упорядоченный набор стратегий
// ==========================================
pub struct RatingExtractor {
    patterns: Vec<Box<dyn RatingPattern>>,
}

impl RatingExtractor {
    /// Набор стратегий в штатном порядке
    pub fn standard() -> Self {
        Self {
            patterns: vec![
                Box::new(TrailingAmps),
                Box::new(MidAmpsComma),
                Box::new(GenericAmps),
                Box::new(AmperesWord),
                Box::new(CurrentWord),
                Box::new(CurrentEquals),
            ],
        }
    }

    /// Нестандартный порядок/состав стратегий
    pub fn with_patterns(patterns: Vec<Box<dyn RatingPattern>>) -> Self {
        Self { patterns }
    }

    /// Извлечь номинальный ток из наименования
    ///
    /// Детерминированно: срабатывает первая совпавшая стратегия.
    /// None означает "позиция без распознаваемого тока" - такой
    /// компонент просто исключается из пула подбора.
    pub fn extract(&self, name: &str) -> Option<u32> {
        let tokens: Vec<String> = name
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if tokens.is_empty() {
            return None;
        }

        for pattern in &self.patterns {
            if let Some(rating) = pattern.extract(&tokens) {
                trace!(pattern = pattern.name(), rating, name, "ток распознан");
                return Some(rating);
            }
        }
        None
    }
}

impl Default for RatingExtractor {
    fn default() -> Self {
        Self::standard()
    }
}
