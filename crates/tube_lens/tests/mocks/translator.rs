use std::sync::{Arc, Mutex};
use tube_lens::translate::{Translate, TranslateError, TranslatorFactory};

/// Prefixes every text with `[<lang>] `.
#[derive(Clone, Default)]
pub struct MockTranslatorFactory {
    pub target_langs: Arc<Mutex<Vec<String>>>,
}

pub struct MockTranslator {
    target_langs: Arc<Mutex<Vec<String>>>,
}

impl TranslatorFactory for MockTranslatorFactory {
    type Client = MockTranslator;

    fn create(&self) -> Self::Client {
        MockTranslator {
            target_langs: self.target_langs.clone(),
        }
    }
}

impl Translate for MockTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> Result<Vec<String>, TranslateError> {
        self.target_langs
            .lock()
            .unwrap()
            .push(target_lang.to_string());
        Ok(texts
            .iter()
            .map(|text| format!("[{target_lang}] {text}"))
            .collect())
    }
}
