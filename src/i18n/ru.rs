use crate::tr;

// Пайплайн
tr!(STARTING_RUN, "Упаковка `{}`...");
tr!(STARTING_CLEAN, "Очистка `{}`...");
tr!(STEP, "Шаг");
tr!(DONE, " готово");
tr!(GOT_ERROR, " ошибка!");
tr!(GOT_WARNING, " не удался, продолжаем");
tr!(WARNING, "Предупреждение");
tr!(ERROR, "Ошибка");

// Шаги
tr!(STEP_CLEAN, "Очистка");
tr!(STEP_ARCHIVE_MAIN, "Архив");
tr!(STEP_ARCHIVE_COPY, "Копия архива");

// Очистка
tr!(CLEAN_REMOVED, "Удалено");
tr!(CLEAN_NOTHING, "Нечего очищать");
tr!(CLEAN_CANT_REMOVE, "Не удалось удалить");

// Архив
tr!(ARCHIVE_ENTRIES, "Записано файлов");
tr!(ARCHIVE_PATH, "Путь к архиву");
tr!(ARCHIVE_EMPTY, "ни один файл не подходит под шаблоны");

// Пути
tr!(CONTEXT_CI, "Сборка в CI");
tr!(CONTEXT_LOCAL, "Локальная сборка");
tr!(CONTEXT_JOB, "Задача");
tr!(CONTEXT_BUILD, "Номер сборки");
tr!(CONTEXT_DATE, "Дата");
tr!(MAIN_TARGET, "Основной архив");
tr!(COPY_TARGET, "Копия архива");

// Настройки
tr!(OPTIONS_LOADED, "Настройки загружены из");
tr!(OPTIONS_DEFAULT, "Файл настроек не найден, используются значения по умолчанию");
