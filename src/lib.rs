// ============================================
// Backrooms - Ядро симуляции лидар-пещеры
// ============================================
// Библиотека без окна и рендера: генерирует объёмную пещеру,
// моделирует агента от первого лица и лидар-сенсор.
// Рендер, камера и сбор ввода — внешние потребители.

pub mod sim;
