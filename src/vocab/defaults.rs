//! Compiled-in word pools used when no vocabulary file is readable.

/// Default modifier pool.
pub const DEFAULT_MODIFIERS: &[&str] = &[
    "아름다운",
    "따뜻한",
    "밝은",
    "새로운",
    "창의적인",
    "독창적인",
    "혁신적인",
    "차가운",
    "깊은",
    "높은",
    "부드러운",
    "강한",
    "빠른",
    "느린",
    "큰",
    "작은",
    "똑똑한",
    "현명한",
    "용감한",
    "친절한",
    "성실한",
    "부지런한",
    "정직한",
    "열정적인",
    "적극적인",
    "능동적인",
    "자발적인",
    "협력적인",
    "포용적인",
    "논리적인",
    "체계적인",
    "분석적인",
    "비판적인",
    "객관적인",
    "합리적인",
];

/// Default noun pool.
pub const DEFAULT_NOUNS: &[&str] = &[
    "바람",
    "별",
    "꿈",
    "빛",
    "마음",
    "생각",
    "미래",
    "희망",
    "에너지",
    "열정",
    "바다",
    "하늘",
    "구름",
    "꽃",
    "나무",
    "물",
    "불",
    "길",
    "집",
    "문",
    "리더",
    "개발자",
    "설계자",
    "분석가",
    "기획자",
    "관리자",
    "전문가",
    "혁신가",
    "창작자",
    "탐험가",
    "도전자",
    "실행자",
    "완주자",
    "달성자",
    "사고자",
    "관찰자",
    "판단자",
    "의사결정자",
    "문제해결사",
    "커뮤니케이터",
];
