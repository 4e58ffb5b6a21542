//! 描画要素の型付き定義
//!
//! 要素の種類ごとに属性とクリック時の動作を持つ。
//! ブラウザ側は `web-wasm` の `build_element` がこれを実際のDOMに変換する。

/// クリック時の動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 現在ページ内の位置で指定した画像を拡大表示
    Magnify(usize),
    /// 拡大表示を閉じる
    Unmagnify,
}

/// 画像要素
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSpec {
    pub src: String,
    pub class: Option<String>,
    pub title: Option<String>,
    /// サムネイルの最大高さ(px)
    pub max_height: Option<u32>,
    pub on_click: Option<Action>,
}

impl ImageSpec {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_max_height(mut self, px: u32) -> Self {
        self.max_height = Some(px);
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    /// style属性の値
    pub fn style(&self) -> Option<String> {
        self.max_height.map(|px| format!("max-height: {}px;", px))
    }
}

/// 描画要素
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Image(ImageSpec),
    LineBreak,
    Heading(String),
}

impl Element {
    pub fn image(src: impl Into<String>) -> Self {
        Element::Image(ImageSpec::new(src))
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Element::Heading(text.into())
    }

    /// 画像要素ならsrcを返す
    pub fn src(&self) -> Option<&str> {
        match self {
            Element::Image(spec) => Some(&spec.src),
            _ => None,
        }
    }
}

/// 拡大表示のオーバーレイ内容
///
/// 基本実装は画像1枚。モードごとに要素を追加していく。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Magnified {
    pub elements: Vec<Element>,
}

impl Magnified {
    pub fn single(src: impl Into<String>) -> Self {
        Self {
            elements: vec![Element::image(src)],
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn image_sources(&self) -> Vec<&str> {
        self.elements.iter().filter_map(Element::src).collect()
    }
}
